use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Asset {
    ticker: String,
    name: String,
    asset_class: AssetClass,
    current_price: Decimal,
}

/// Closed set of asset classes. The display form is what gets stored.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum AssetClass {
    Equity,
    #[strum(to_string = "Fixed Income", serialize = "fixed-income", serialize = "FixedIncome")]
    #[serde(rename = "Fixed Income")]
    FixedIncome,
    Crypto,
    Commodity,
}

impl AssetClass {
    pub fn to_str(&self) -> &'static str {
        self.into()
    }
}
