use std::collections::BTreeMap;

use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AssetClass, Holding};

/// Totals across all open holdings, as shown on the dashboard.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, Serialize)]
pub struct PortfolioSummary {
    total_value: Decimal,
    total_gain_loss: Decimal,
    gain_loss_ratio: Decimal,
    value_by_class: BTreeMap<AssetClass, Decimal>,
}

pub fn summarize(holdings: &[Holding]) -> PortfolioSummary {
    let total_value: Decimal = holdings.iter().map(Holding::current_value).sum();
    let total_gain_loss: Decimal = holdings.iter().map(Holding::gain_loss).sum();

    PortfolioSummary {
        total_value,
        total_gain_loss,
        gain_loss_ratio: gain_loss_ratio(total_gain_loss, total_value),
        value_by_class: value_by_class(holdings),
    }
}

pub fn gain_loss_ratio(gain_loss: Decimal, value: Decimal) -> Decimal {
    if value > Decimal::ZERO {
        gain_loss / value
    } else {
        Decimal::ZERO
    }
}

pub fn value_by_class(holdings: &[Holding]) -> BTreeMap<AssetClass, Decimal> {
    let mut breakdown = BTreeMap::new();
    for holding in holdings {
        *breakdown
            .entry(*holding.asset_class())
            .or_insert(Decimal::ZERO) += holding.current_value();
    }
    breakdown
}
