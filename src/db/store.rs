use std::{fmt::Display, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, error};
use rust_decimal::Decimal;
use sqlx::{
    Connection, SqliteConnection,
    sqlite::{SqliteConnectOptions, SqliteQueryResult},
};

use super::utils::{DATE_FORMAT, decimal_to_db, parse_asset, parse_rows, parse_transaction};
use crate::models::{Asset, AssetClass, Transaction, TransactionType};

/// Handle to the ledger database.
///
/// Holds connection options only. Every operation opens its own connection,
/// runs a single statement and closes the connection again before returning.
/// Public operations never return errors: failures are logged and reported as
/// `false`, an empty `Vec` or `None`.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    options: SqliteConnectOptions,
}

impl LedgerStore {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self {
            options: options.foreign_keys(true),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        )
    }

    pub(crate) async fn connect(&self) -> Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .context("Failed to connect to ledger database")
    }

    pub async fn upsert_asset(
        &self,
        ticker: &str,
        name: &str,
        asset_class: AssetClass,
        price: Decimal,
    ) -> bool {
        let result = self.try_upsert_asset(ticker, name, asset_class, price).await;
        settle(result, format_args!("creating asset '{}'", ticker)).is_some()
    }

    pub async fn record_transaction(
        &self,
        ticker: &str,
        date: NaiveDate,
        transaction_type: TransactionType,
        shares: Decimal,
        price: Decimal,
        total_cost: Decimal,
    ) -> bool {
        let result = self
            .try_record_transaction(ticker, date, transaction_type, shares, price, total_cost)
            .await;
        settle(result, format_args!("creating transaction for '{}'", ticker)).is_some()
    }

    pub async fn list_assets(&self) -> Vec<Asset> {
        settle(self.try_list_assets().await, format_args!("reading assets")).unwrap_or_default()
    }

    pub async fn list_transactions(&self) -> Vec<Transaction> {
        settle(
            self.try_list_transactions().await,
            format_args!("reading transactions"),
        )
        .unwrap_or_default()
    }

    pub async fn update_price(&self, ticker: &str, new_price: Decimal) -> bool {
        let result = self.try_update_price(ticker, new_price).await;
        settle(result, format_args!("updating price of '{}'", ticker)).is_some()
    }

    pub async fn delete_transaction(&self, id: i64) -> bool {
        let result = self.try_delete_transaction(id).await;
        settle(result, format_args!("deleting transaction {}", id)).is_some()
    }

    async fn try_upsert_asset(
        &self,
        ticker: &str,
        name: &str,
        asset_class: AssetClass,
        price: Decimal,
    ) -> Result<()> {
        let query = sqlx::query(
            r#"
            INSERT INTO assets
            (ticker_symbol, asset_name, asset_class, current_price)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (ticker_symbol) DO UPDATE SET
                current_price = excluded.current_price,
                asset_class = excluded.asset_class
            "#,
        )
        .bind(ticker)
        .bind(name)
        .bind(asset_class.to_str())
        .bind(decimal_to_db(&price));

        self.execute(query).await?;
        Ok(())
    }

    async fn try_record_transaction(
        &self,
        ticker: &str,
        date: NaiveDate,
        transaction_type: TransactionType,
        shares: Decimal,
        price: Decimal,
        total_cost: Decimal,
    ) -> Result<i64> {
        let query = sqlx::query(
            r#"
            INSERT INTO transactions
            (
                ticker_symbol,
                transaction_date,
                transaction_type,
                shares,
                price_per_share,
                total_cost
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(ticker)
        .bind(date.format(DATE_FORMAT).to_string())
        .bind(transaction_type.to_str())
        .bind(decimal_to_db(&shares))
        .bind(decimal_to_db(&price))
        .bind(decimal_to_db(&total_cost));

        let id = self.execute(query).await?.last_insert_rowid();
        debug!("Recorded transaction {} for {}", id, ticker);
        Ok(id)
    }

    async fn try_list_assets(&self) -> Result<Vec<Asset>> {
        let mut connection = self.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT ticker_symbol, asset_name, asset_class, current_price
            FROM assets
            ORDER BY ticker_symbol
            "#,
        )
        .fetch_all(&mut connection)
        .await;
        connection.close().await?;

        Ok(parse_rows(rows?, parse_asset, "asset"))
    }

    async fn try_list_transactions(&self) -> Result<Vec<Transaction>> {
        let mut connection = self.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                transaction_id,
                ticker_symbol,
                transaction_date,
                transaction_type,
                shares,
                price_per_share,
                total_cost
            FROM transactions
            ORDER BY transaction_date DESC, transaction_id DESC
            "#,
        )
        .fetch_all(&mut connection)
        .await;
        connection.close().await?;

        Ok(parse_rows(rows?, parse_transaction, "transaction"))
    }

    async fn try_update_price(&self, ticker: &str, new_price: Decimal) -> Result<()> {
        let query = sqlx::query("UPDATE assets SET current_price = ? WHERE ticker_symbol = ?")
            .bind(decimal_to_db(&new_price))
            .bind(ticker);

        let result = self.execute(query).await?;
        debug!(
            "Price update for {} touched {} row(s)",
            ticker,
            result.rows_affected()
        );
        Ok(())
    }

    async fn try_delete_transaction(&self, id: i64) -> Result<()> {
        let query = sqlx::query("DELETE FROM transactions WHERE transaction_id = ?").bind(id);

        let result = self.execute(query).await?;
        debug!(
            "Delete of transaction {} touched {} row(s)",
            id,
            result.rows_affected()
        );
        Ok(())
    }

    /// Runs one write statement on a fresh connection. SQLite autocommits it.
    async fn execute<'q>(
        &self,
        query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> Result<SqliteQueryResult> {
        let mut connection = self.connect().await?;
        let result = query.execute(&mut connection).await;
        connection.close().await?;

        Ok(result?)
    }
}

/// Logs a failed store round-trip and turns it into `None`.
pub(crate) fn settle<T>(result: Result<T>, operation: impl Display) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!("Error {}: {:#}", operation, err);
            None
        }
    }
}
