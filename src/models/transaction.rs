use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Transaction {
    id: i64,
    ticker: String,
    date: NaiveDate,
    transaction_type: TransactionType,
    shares: Decimal,
    price_per_share: Decimal,
    total_cost: Decimal,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
    #[strum(to_string = "dividend", serialize = "div")]
    Dividend,
}

impl TransactionType {
    pub fn to_str(&self) -> &'static str {
        self.into()
    }
}
