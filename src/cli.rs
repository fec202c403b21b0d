use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    app::{
        calc::{self, PortfolioSummary},
        utils::{format_money, format_percent, format_shares, parse_date},
    },
    db::LedgerStore,
    models::{AssetClass, Holding, TransactionType},
};

#[derive(Debug, Parser)]
#[command(name = "finance-tracker", version, about = "Personal financial portfolio tracker")]
pub struct Cli {
    /// SQLite database file
    #[arg(long, short, env = "FINANCE_TRACKER_DB")]
    pub database: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "FINANCE_TRACKER_LOG")]
    pub log_file: Option<String>,

    /// Runs the interactive dashboard when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add, reprice or list assets
    #[command(subcommand)]
    Asset(AssetCommand),
    /// Log, list or delete transactions
    #[command(subcommand)]
    Tx(TransactionCommand),
    /// Open positions with totals and the breakdown by asset class
    Holdings {
        #[arg(long)]
        json: bool,
    },
    /// Aggregate statistics over all assets and transactions
    Insights {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssetCommand {
    /// Add an asset, or update class and price of an existing ticker
    Add {
        ticker: String,
        name: String,
        /// Equity, "Fixed Income", Crypto or Commodity
        class: AssetClass,
        price: Decimal,
    },
    /// Set the current price of an asset
    Price { ticker: String, price: Decimal },
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TransactionCommand {
    /// Log a buy, sell or dividend. Total cost is shares x price.
    Add {
        ticker: String,
        transaction_type: TransactionType,
        shares: Decimal,
        price: Decimal,
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    Delete { id: i64 },
}

#[derive(Serialize)]
struct HoldingsReport<'a> {
    holdings: &'a [Holding],
    summary: &'a PortfolioSummary,
}

pub async fn execute(command: Command, store: &LedgerStore) -> Result<()> {
    match command {
        Command::Asset(command) => execute_asset(command, store).await,
        Command::Tx(command) => execute_transaction(command, store).await,
        Command::Holdings { json } => {
            let holdings = store.summarize_holdings().await;
            let summary = calc::summarize(&holdings);
            if json {
                return print_json(&HoldingsReport {
                    holdings: &holdings,
                    summary: &summary,
                });
            }
            print_holdings(&holdings, &summary);
            Ok(())
        }
        Command::Insights { json } => {
            let insights = store.summarize_business_insights().await;
            if json {
                return print_json(&insights);
            }
            match insights {
                Some(insights) => {
                    println!("Total Unique Assets:      {}", insights.total_unique_assets());
                    println!("Total Transactions:       {}", insights.total_transactions());
                    println!(
                        "Total Buy Cost:           {}",
                        format_money(insights.total_buy_cost())
                    );
                    println!(
                        "Average Price per Share:  {}",
                        format_money(insights.avg_price_per_share())
                    );
                    println!(
                        "Max Transaction Cost:     {}",
                        format_money(insights.max_transaction_cost())
                    );
                    println!(
                        "Min Transaction Cost:     {}",
                        format_money(insights.min_transaction_cost())
                    );
                }
                None => println!("No insights available. Please add assets and transactions."),
            }
            Ok(())
        }
    }
}

async fn execute_asset(command: AssetCommand, store: &LedgerStore) -> Result<()> {
    match command {
        AssetCommand::Add {
            ticker,
            name,
            class,
            price,
        } => {
            let ticker = ticker.to_uppercase();
            if !store.upsert_asset(&ticker, &name, class, price).await {
                bail!("Failed to save asset. Check your inputs and database connection.");
            }
            println!("Asset '{}' saved successfully!", ticker);
        }
        AssetCommand::Price { ticker, price } => {
            let ticker = ticker.to_uppercase();
            if !store.update_price(&ticker, price).await {
                bail!("Failed to update price.");
            }
            println!("Price for {} updated successfully!", ticker);
        }
        AssetCommand::List { json } => {
            let assets = store.list_assets().await;
            if json {
                return print_json(&assets);
            }
            if assets.is_empty() {
                println!("No assets to display.");
                return Ok(());
            }
            println!(
                "{:<10} {:<30} {:<14} {:>15}",
                "Ticker", "Name", "Class", "Current Price"
            );
            for asset in &assets {
                println!(
                    "{:<10} {:<30} {:<14} {:>15}",
                    asset.ticker(),
                    asset.name(),
                    asset.asset_class().to_string(),
                    format_money(asset.current_price())
                );
            }
        }
    }
    Ok(())
}

async fn execute_transaction(command: TransactionCommand, store: &LedgerStore) -> Result<()> {
    match command {
        TransactionCommand::Add {
            ticker,
            transaction_type,
            shares,
            price,
            date,
        } => {
            let ticker = ticker.to_uppercase();
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let total_cost = shares * price;
            let recorded = store
                .record_transaction(&ticker, date, transaction_type, shares, price, total_cost)
                .await;
            if !recorded {
                bail!(
                    "Failed to log transaction. Ensure the asset ticker exists and inputs are valid."
                );
            }
            println!(
                "Transaction for {} logged successfully! Total Cost: {}",
                ticker,
                format_money(&total_cost)
            );
        }
        TransactionCommand::List { json } => {
            let transactions = store.list_transactions().await;
            if json {
                return print_json(&transactions);
            }
            if transactions.is_empty() {
                println!("No transactions logged yet.");
                return Ok(());
            }
            println!(
                "{:>6} {:<10} {:<12} {:<10} {:>15} {:>15} {:>15}",
                "ID", "Ticker", "Date", "Type", "Shares", "Price", "Total Cost"
            );
            for transaction in &transactions {
                println!(
                    "{:>6} {:<10} {:<12} {:<10} {:>15} {:>15} {:>15}",
                    transaction.id(),
                    transaction.ticker(),
                    transaction.date().to_string(),
                    transaction.transaction_type().to_string(),
                    format_shares(transaction.shares()),
                    format_money(transaction.price_per_share()),
                    format_money(transaction.total_cost())
                );
            }
        }
        TransactionCommand::Delete { id } => {
            if !store.delete_transaction(id).await {
                bail!("Failed to delete transaction. Ensure the ID is correct.");
            }
            println!("Transaction with ID {} deleted successfully!", id);
        }
    }
    Ok(())
}

fn print_holdings(holdings: &[Holding], summary: &PortfolioSummary) {
    if holdings.is_empty() {
        println!("No assets in your portfolio yet. Add some with `finance-tracker asset add`.");
        return;
    }

    println!(
        "Total Portfolio Value: {}    Total Gain/Loss: {} ({})",
        format_money(summary.total_value()),
        format_money(summary.total_gain_loss()),
        format_percent(summary.gain_loss_ratio())
    );
    println!();
    println!(
        "{:<10} {:<24} {:<14} {:>14} {:>15} {:>15} {:>15} {:>15}",
        "Ticker", "Name", "Class", "Shares", "Cost Basis", "Current Price", "Current Value",
        "Gain/Loss"
    );
    for holding in holdings {
        println!(
            "{:<10} {:<24} {:<14} {:>14} {:>15} {:>15} {:>15} {:>15}",
            holding.ticker(),
            holding.name(),
            holding.asset_class().to_string(),
            format_shares(holding.net_shares()),
            format_money(holding.cost_basis()),
            format_money(holding.current_price()),
            format_money(&holding.current_value()),
            format_money(&holding.gain_loss())
        );
    }
    println!();
    println!("Portfolio by Asset Class");
    for (class, value) in summary.value_by_class() {
        println!("{:<14} {:>15}", class.to_string(), format_money(value));
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
