#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        models::{AssetClass, BusinessInsights, TransactionType},
        test::{record, temp_store},
    };

    #[tokio::test]
    async fn closed_position_is_excluded() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(20)).await;
        record(&store, "X", "2024-01-01", TransactionType::Buy, dec!(10), dec!(15)).await;
        record(&store, "X", "2024-02-01", TransactionType::Sell, dec!(10), dec!(18)).await;

        assert!(store.summarize_holdings().await.is_empty());
    }

    #[tokio::test]
    async fn fractional_sells_close_position() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(2)).await;
        record(&store, "X", "2024-01-01", TransactionType::Buy, dec!(0.1), dec!(1)).await;
        record(&store, "X", "2024-01-02", TransactionType::Buy, dec!(0.2), dec!(1)).await;
        record(&store, "X", "2024-01-03", TransactionType::Sell, dec!(0.3), dec!(1)).await;

        // 0.1 + 0.2 - 0.3 is not exactly zero in REAL arithmetic.
        assert!(store.summarize_holdings().await.is_empty());
    }

    #[tokio::test]
    async fn net_shares_subtract_sells() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(20)).await;
        record(&store, "X", "2024-01-01", TransactionType::Buy, dec!(10), dec!(10)).await;
        record(&store, "X", "2024-01-02", TransactionType::Buy, dec!(5), dec!(12)).await;
        record(&store, "X", "2024-01-03", TransactionType::Sell, dec!(3), dec!(14)).await;

        let holdings = store.summarize_holdings().await;
        assert_eq!(holdings.len(), 1);

        let holding = &holdings[0];
        assert_eq!(holding.ticker(), "X");
        assert_eq!(holding.name(), "X Corp");
        assert_eq!(*holding.asset_class(), AssetClass::Equity);
        assert_eq!(*holding.net_shares(), dec!(12));
        assert_eq!(*holding.current_price(), dec!(20));
        // 100 + 60 + 42: the sell is added to the cost basis as well.
        assert_eq!(*holding.cost_basis(), dec!(202));
    }

    #[tokio::test]
    async fn dividends_add_cost_but_not_shares() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("KO", "Coca-Cola", AssetClass::Equity, dec!(60)).await;
        record(&store, "KO", "2024-01-01", TransactionType::Buy, dec!(4), dec!(50)).await;
        record(&store, "KO", "2024-04-01", TransactionType::Dividend, dec!(4), dec!(0.5)).await;

        let holdings = store.summarize_holdings().await;
        assert_eq!(*holdings[0].net_shares(), dec!(4));
        assert_eq!(*holdings[0].cost_basis(), dec!(202));
        assert_eq!(holdings[0].current_value(), dec!(240));
        assert_eq!(holdings[0].gain_loss(), dec!(38));
    }

    #[tokio::test]
    async fn holdings_follow_price_updates() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("ETH", "Ether", AssetClass::Crypto, dec!(2000)).await;
        store.upsert_asset("GLD", "Gold", AssetClass::Commodity, dec!(180)).await;
        store.upsert_asset("UNUSED", "Never traded", AssetClass::Equity, dec!(1)).await;
        record(&store, "ETH", "2024-01-01", TransactionType::Buy, dec!(2), dec!(1500)).await;
        record(&store, "GLD", "2024-01-01", TransactionType::Buy, dec!(10), dec!(170)).await;

        store.update_price("ETH", dec!(2500)).await;

        let holdings = store.summarize_holdings().await;
        let tickers = holdings.iter().map(|h| h.ticker().as_str()).collect::<Vec<_>>();
        assert_eq!(tickers, vec!["ETH", "GLD"]);
        assert_eq!(holdings[0].current_value(), dec!(5000));
        assert_eq!(holdings[0].gain_loss(), dec!(2000));
    }

    #[tokio::test]
    async fn insights_on_empty_ledger_are_empty() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(20)).await;

        assert_eq!(store.summarize_business_insights().await, None);
    }

    #[tokio::test]
    async fn insights_without_buys_are_empty() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(20)).await;
        record(&store, "X", "2024-01-01", TransactionType::Dividend, dec!(1), dec!(3)).await;

        assert_eq!(store.summarize_business_insights().await, None);
    }

    #[tokio::test]
    async fn insights_aggregate_the_whole_ledger() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("A", "Apple", AssetClass::Equity, dec!(120)).await;
        store.upsert_asset("B", "Bitcoin", AssetClass::Crypto, dec!(100)).await;
        store.upsert_asset("C", "Copper", AssetClass::Commodity, dec!(4)).await;
        record(&store, "A", "2024-01-01", TransactionType::Buy, dec!(10), dec!(100)).await;
        record(&store, "B", "2024-01-02", TransactionType::Buy, dec!(2), dec!(110)).await;
        record(&store, "A", "2024-01-03", TransactionType::Sell, dec!(5), dec!(120)).await;

        let insights = store.summarize_business_insights().await;
        assert_eq!(
            insights,
            Some(BusinessInsights::new(
                3,
                3,
                dec!(1220),
                dec!(110),
                dec!(1000),
                dec!(220),
            ))
        );
    }
}
