use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::AssetClass;

/// Current position in one asset, aggregated from its transactions.
///
/// `cost_basis` is the plain sum of `total_cost` over every transaction of the
/// ticker. Sell rows are added, not subtracted.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Holding {
    ticker: String,
    name: String,
    asset_class: AssetClass,
    net_shares: Decimal,
    cost_basis: Decimal,
    current_price: Decimal,
}

impl Holding {
    pub fn current_value(&self) -> Decimal {
        self.net_shares * self.current_price
    }

    pub fn gain_loss(&self) -> Decimal {
        self.current_value() - self.cost_basis
    }
}
