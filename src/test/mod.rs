mod store;
mod summary;
mod utils;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::{
    db::{LedgerStore, init_schema},
    models::TransactionType,
};

/// A ledger in its own temporary SQLite file. Keep the `TempDir` alive for the
/// duration of the test.
pub(crate) async fn temp_store() -> (TempDir, LedgerStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::open(dir.path().join("ledger.db"));
    init_schema(&store).await.unwrap();
    (dir, store)
}

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) async fn record(
    store: &LedgerStore,
    ticker: &str,
    on: &str,
    transaction_type: TransactionType,
    shares: Decimal,
    price: Decimal,
) -> bool {
    store
        .record_transaction(
            ticker,
            date(on),
            transaction_type,
            shares,
            price,
            shares * price,
        )
        .await
}
