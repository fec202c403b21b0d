use anyhow::{Context, Result};
use log::debug;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sqlx::{Connection, Row, SqliteConnection};

use super::{
    LedgerStore,
    store::settle,
    utils::{STORED_DECIMAL_PLACES, parse_holding, parse_rows},
};
use crate::models::{BusinessInsights, Holding};

impl LedgerStore {
    /// Open positions, one per ticker with a positive net share count.
    pub async fn summarize_holdings(&self) -> Vec<Holding> {
        settle(
            self.try_summarize_holdings().await,
            format_args!("reading portfolio summary"),
        )
        .unwrap_or_default()
    }

    /// All six aggregates, or `None` if any of them could not be computed.
    pub async fn summarize_business_insights(&self) -> Option<BusinessInsights> {
        let mut connection = match self.connect().await {
            Ok(connection) => connection,
            Err(err) => return settle(Err(err), format_args!("fetching business insights")),
        };

        let insights = business_insights(&mut connection).await;
        let closed = connection.close().await.map_err(anyhow::Error::from);

        settle(
            closed.and(insights),
            format_args!("fetching business insights"),
        )
    }

    async fn try_summarize_holdings(&self) -> Result<Vec<Holding>> {
        let mut connection = self.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                t.ticker_symbol,
                a.asset_name,
                a.asset_class,
                SUM(CASE t.transaction_type
                    WHEN 'buy' THEN t.shares
                    WHEN 'sell' THEN -t.shares
                    ELSE 0.0
                END) AS total_shares,
                SUM(t.total_cost) AS total_cost_basis,
                a.current_price
            FROM transactions t
            JOIN assets a ON t.ticker_symbol = a.ticker_symbol
            GROUP BY t.ticker_symbol, a.asset_name, a.asset_class, a.current_price
            HAVING ROUND(SUM(CASE t.transaction_type
                WHEN 'buy' THEN t.shares
                WHEN 'sell' THEN -t.shares
                ELSE 0.0
            END), 4) > 0
            ORDER BY t.ticker_symbol
            "#,
        )
        .fetch_all(&mut connection)
        .await;
        connection.close().await?;

        let holdings = parse_rows(rows?, parse_holding, "holding");
        debug!("Summarized {} open holding(s)", holdings.len());
        Ok(holdings)
    }
}

/// Runs each aggregate as its own statement on one connection. The first
/// failing or `NULL` aggregate aborts the whole batch.
async fn business_insights(connection: &mut SqliteConnection) -> Result<BusinessInsights> {
    let total_unique_assets =
        count(connection, "SELECT COUNT(DISTINCT ticker_symbol) FROM assets").await?;
    let total_transactions = count(connection, "SELECT COUNT(*) FROM transactions").await?;
    let total_buy_cost = aggregate(
        connection,
        "SELECT SUM(total_cost) FROM transactions WHERE transaction_type = 'buy'",
        "total_buy_cost",
    )
    .await?;
    let avg_price_per_share = aggregate(
        connection,
        "SELECT AVG(price_per_share) FROM transactions",
        "avg_price_per_share",
    )
    .await?;
    let max_transaction_cost = aggregate(
        connection,
        "SELECT MAX(total_cost) FROM transactions",
        "max_transaction_cost",
    )
    .await?;
    let min_transaction_cost = aggregate(
        connection,
        "SELECT MIN(total_cost) FROM transactions",
        "min_transaction_cost",
    )
    .await?;

    Ok(BusinessInsights::new(
        total_unique_assets,
        total_transactions,
        total_buy_cost,
        avg_price_per_share,
        max_transaction_cost,
        min_transaction_cost,
    ))
}

async fn count(connection: &mut SqliteConnection, sql: &str) -> Result<i64> {
    let row = sqlx::query(sql).fetch_one(&mut *connection).await?;
    row.try_get::<i64, _>(0)
        .with_context(|| format!("Failed to read count from '{}'", sql))
}

async fn aggregate(connection: &mut SqliteConnection, sql: &str, name: &str) -> Result<Decimal> {
    let row = sqlx::query(sql).fetch_one(&mut *connection).await?;
    let value: Option<f64> = row
        .try_get(0)
        .with_context(|| format!("Failed to read {}", name))?;
    let value = value.with_context(|| format!("No value for {}", name))?;

    Decimal::from_f64(value)
        .map(|d| d.round_dp(STORED_DECIMAL_PLACES).normalize())
        .with_context(|| format!("Failed to convert {} to Decimal", name))
}
