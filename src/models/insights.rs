use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct BusinessInsights {
    total_unique_assets: i64,
    total_transactions: i64,
    total_buy_cost: Decimal,
    avg_price_per_share: Decimal,
    max_transaction_cost: Decimal,
    min_transaction_cost: Decimal,
}
