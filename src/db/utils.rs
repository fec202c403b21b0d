use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{Asset, AssetClass, Holding, Transaction, TransactionType};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values are stored as REAL rounded to this many places.
pub const STORED_DECIMAL_PLACES: u32 = 4;

pub fn decimal_to_db(value: &Decimal) -> Option<f64> {
    value.round_dp(STORED_DECIMAL_PLACES).to_f64()
}

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    let value: Option<f64> = row
        .try_get(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))?;
    value.with_context(|| format!("Column '{}' is NULL", column))
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .map(|d| d.round_dp(STORED_DECIMAL_PLACES).normalize())
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_date_from_row(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    let date_str = parse_string_from_row(row, column)?;
    NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .with_context(|| format!("Failed to parse date '{}' from column '{}'", date_str, column))
}

pub fn parse_asset_class_from_row(row: &SqliteRow, column: &str) -> Result<AssetClass> {
    let class_str = parse_string_from_row(row, column)?;
    AssetClass::from_str(&class_str)
        .with_context(|| format!("Unknown asset class '{}' in column '{}'", class_str, column))
}

pub fn parse_transaction_type_from_row(row: &SqliteRow, column: &str) -> Result<TransactionType> {
    let type_str = parse_string_from_row(row, column)?;
    TransactionType::from_str(&type_str).with_context(|| {
        format!(
            "Unknown transaction type '{}' in column '{}'",
            type_str, column
        )
    })
}

/// Decodes every row it can. Rows that fail to decode are logged and skipped.
pub fn parse_rows<T>(
    rows: Vec<SqliteRow>,
    parse: impl Fn(SqliteRow) -> Result<T>,
    kind: &str,
) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match parse(row) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Skipping undecodable {} row: {:#}", kind, err);
                None
            }
        })
        .collect()
}

pub fn parse_asset(row: SqliteRow) -> Result<Asset> {
    let ticker = parse_string_from_row(&row, "ticker_symbol")?;
    let name = parse_string_from_row(&row, "asset_name")?;
    let asset_class = parse_asset_class_from_row(&row, "asset_class")?;
    let current_price = parse_decimal_from_row(&row, "current_price")?;

    Ok(Asset::new(ticker, name, asset_class, current_price))
}

pub fn parse_transaction(row: SqliteRow) -> Result<Transaction> {
    let id = parse_i64_from_row(&row, "transaction_id")?;
    let ticker = parse_string_from_row(&row, "ticker_symbol")?;
    let date = parse_date_from_row(&row, "transaction_date")?;
    let transaction_type = parse_transaction_type_from_row(&row, "transaction_type")?;
    let shares = parse_decimal_from_row(&row, "shares")?;
    let price_per_share = parse_decimal_from_row(&row, "price_per_share")?;
    let total_cost = parse_decimal_from_row(&row, "total_cost")?;

    Ok(Transaction::new(
        id,
        ticker,
        date,
        transaction_type,
        shares,
        price_per_share,
        total_cost,
    ))
}

pub fn parse_holding(row: SqliteRow) -> Result<Holding> {
    let ticker = parse_string_from_row(&row, "ticker_symbol")?;
    let name = parse_string_from_row(&row, "asset_name")?;
    let asset_class = parse_asset_class_from_row(&row, "asset_class")?;
    let net_shares = parse_decimal_from_row(&row, "total_shares")?;
    let cost_basis = parse_decimal_from_row(&row, "total_cost_basis")?;
    let current_price = parse_decimal_from_row(&row, "current_price")?;

    Ok(Holding::new(
        ticker,
        name,
        asset_class,
        net_shares,
        cost_basis,
        current_price,
    ))
}
