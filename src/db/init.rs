use anyhow::{Context, Result};
use sqlx::{Connection, SqliteConnection, sqlite::SqliteQueryResult};

use super::LedgerStore;

pub async fn init_schema(store: &LedgerStore) -> Result<()> {
    let mut connection = store.connect().await?;

    let result = async {
        create_assets(&mut connection)
            .await
            .context("Failed to create assets table")?;
        create_transactions(&mut connection)
            .await
            .context("Failed to create transactions table")?;
        anyhow::Ok(())
    }
    .await;

    connection.close().await?;
    result
}

pub async fn create_assets(
    connection: &mut SqliteConnection,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assets (
            ticker_symbol TEXT PRIMARY KEY,
            asset_name TEXT NOT NULL,
            asset_class TEXT NOT NULL
                CHECK (asset_class IN ('Equity', 'Fixed Income', 'Crypto', 'Commodity')),
            current_price REAL NOT NULL CHECK (current_price >= 0)
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_transactions(
    connection: &mut SqliteConnection,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
            ticker_symbol TEXT NOT NULL REFERENCES assets(ticker_symbol),
            transaction_date TEXT NOT NULL,
            transaction_type TEXT NOT NULL
                CHECK (transaction_type IN ('buy', 'sell', 'dividend')),
            shares REAL NOT NULL,
            price_per_share REAL NOT NULL,
            total_cost REAL NOT NULL
        )
        "#,
    )
    .execute(connection)
    .await
}
