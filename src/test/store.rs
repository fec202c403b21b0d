#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sqlx::Connection;

    use crate::{
        db::{LedgerStore, init::create_transactions},
        models::{Asset, AssetClass, TransactionType},
        test::{date, record, temp_store},
    };

    #[tokio::test]
    async fn upsert_keeps_name_and_overwrites_price() {
        let (_dir, store) = temp_store().await;

        assert!(store.upsert_asset("A", "Apple", AssetClass::Equity, dec!(100)).await);
        assert!(store.upsert_asset("A", "AppleX", AssetClass::Equity, dec!(150)).await);

        let assets = store.list_assets().await;
        assert_eq!(
            assets,
            vec![Asset::new(
                "A".to_string(),
                "Apple".to_string(),
                AssetClass::Equity,
                dec!(150)
            )]
        );
    }

    #[tokio::test]
    async fn upsert_overwrites_class() {
        let (_dir, store) = temp_store().await;

        assert!(store.upsert_asset("GLD", "Gold", AssetClass::Equity, dec!(180)).await);
        assert!(store.upsert_asset("GLD", "Gold", AssetClass::Commodity, dec!(185.5)).await);

        let assets = store.list_assets().await;
        assert_eq!(assets.len(), 1);
        assert_eq!(*assets[0].asset_class(), AssetClass::Commodity);
        assert_eq!(*assets[0].current_price(), dec!(185.5));
    }

    #[tokio::test]
    async fn rejected_upsert_leaves_asset_untouched() {
        let (_dir, store) = temp_store().await;

        assert!(store.upsert_asset("BND", "Bond ETF", AssetClass::FixedIncome, dec!(72)).await);
        assert!(!store.upsert_asset("BND", "Bond ETF", AssetClass::Crypto, dec!(-1)).await);

        let assets = store.list_assets().await;
        assert_eq!(*assets[0].asset_class(), AssetClass::FixedIncome);
        assert_eq!(*assets[0].current_price(), dec!(72));
    }

    #[tokio::test]
    async fn transactions_are_listed_most_recent_first() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(10)).await;

        assert!(record(&store, "X", "2024-01-05", TransactionType::Buy, dec!(1), dec!(10)).await);
        assert!(record(&store, "X", "2024-03-01", TransactionType::Sell, dec!(1), dec!(12)).await);
        assert!(record(&store, "X", "2024-02-10", TransactionType::Dividend, dec!(1), dec!(0.5)).await);

        let dates = store
            .list_transactions()
            .await
            .iter()
            .map(|t| *t.date())
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![date("2024-03-01"), date("2024-02-10"), date("2024-01-05")]
        );
    }

    #[tokio::test]
    async fn recorded_transaction_round_trips_its_fields() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("BTC", "Bitcoin", AssetClass::Crypto, dec!(60000)).await;

        assert!(
            store
                .record_transaction(
                    "BTC",
                    date("2024-06-30"),
                    TransactionType::Buy,
                    dec!(0.25),
                    dec!(58000),
                    dec!(14500),
                )
                .await
        );

        let transactions = store.list_transactions().await;
        assert_eq!(transactions.len(), 1);
        let transaction = &transactions[0];
        assert_eq!(transaction.ticker(), "BTC");
        assert_eq!(*transaction.transaction_type(), TransactionType::Buy);
        assert_eq!(*transaction.shares(), dec!(0.25));
        assert_eq!(*transaction.price_per_share(), dec!(58000));
        assert_eq!(*transaction.total_cost(), dec!(14500));
    }

    #[tokio::test]
    async fn transaction_for_unknown_ticker_is_rejected() {
        let (_dir, store) = temp_store().await;

        assert!(!record(&store, "NOPE", "2024-01-01", TransactionType::Buy, dec!(1), dec!(1)).await);
        assert!(store.list_transactions().await.is_empty());
    }

    #[tokio::test]
    async fn update_price_changes_only_that_asset() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("A", "Apple", AssetClass::Equity, dec!(100)).await;
        store.upsert_asset("B", "Boeing", AssetClass::Equity, dec!(200)).await;

        assert!(store.update_price("A", dec!(123.45)).await);

        let assets = store.list_assets().await;
        assert_eq!(*assets[0].current_price(), dec!(123.45));
        assert_eq!(*assets[1].current_price(), dec!(200));
    }

    #[tokio::test]
    async fn update_price_of_missing_ticker_succeeds() {
        let (_dir, store) = temp_store().await;

        assert!(store.update_price("MISSING", dec!(1)).await);
        assert!(store.list_assets().await.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_that_transaction() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(10)).await;
        record(&store, "X", "2024-01-01", TransactionType::Buy, dec!(5), dec!(10)).await;
        record(&store, "X", "2024-01-02", TransactionType::Buy, dec!(3), dec!(11)).await;

        let newest = *store.list_transactions().await[0].id();
        assert!(store.delete_transaction(newest).await);

        let remaining = store.list_transactions().await;
        assert_eq!(remaining.len(), 1);
        assert_ne!(*remaining[0].id(), newest);
    }

    #[tokio::test]
    async fn delete_of_missing_id_succeeds_without_changes() {
        let (_dir, store) = temp_store().await;
        store.upsert_asset("X", "X Corp", AssetClass::Equity, dec!(10)).await;
        record(&store, "X", "2024-01-01", TransactionType::Buy, dec!(5), dec!(10)).await;
        let before = store.list_transactions().await;

        assert!(store.delete_transaction(9999).await);

        assert_eq!(store.list_transactions().await, before);
    }

    #[tokio::test]
    async fn operations_without_schema_report_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::open(dir.path().join("empty.db"));

        assert!(!store.upsert_asset("A", "Apple", AssetClass::Equity, dec!(1)).await);
        assert!(!store.update_price("A", dec!(2)).await);
        assert!(!store.delete_transaction(1).await);
        assert!(store.list_assets().await.is_empty());
        assert!(store.list_transactions().await.is_empty());
        assert!(store.summarize_holdings().await.is_empty());
        assert!(store.summarize_business_insights().await.is_none());
    }

    #[tokio::test]
    async fn schema_rejects_unknown_asset_class() {
        let (_dir, store) = temp_store().await;
        let mut connection = store.connect().await.unwrap();

        let inserted = sqlx::query("INSERT INTO assets VALUES ('R', 'Reit', 'Real Estate', 5)")
            .execute(&mut connection)
            .await;
        connection.close().await.unwrap();

        assert!(inserted.is_err());
        assert!(store.list_assets().await.is_empty());
    }

    #[tokio::test]
    async fn undecodable_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::open(dir.path().join("legacy.db"));

        // A table created before the asset class was constrained.
        let mut connection = store.connect().await.unwrap();
        for sql in [
            "CREATE TABLE assets (
                ticker_symbol TEXT PRIMARY KEY,
                asset_name TEXT NOT NULL,
                asset_class TEXT NOT NULL,
                current_price REAL NOT NULL
            )",
            "INSERT INTO assets VALUES ('A', 'Apple', 'Equity', 100)",
            "INSERT INTO assets VALUES ('R', 'Reit', 'Real Estate', 5)",
        ] {
            sqlx::query(sql).execute(&mut connection).await.unwrap();
        }
        create_transactions(&mut connection).await.unwrap();
        connection.close().await.unwrap();

        record(&store, "A", "2024-01-01", TransactionType::Buy, dec!(1), dec!(90)).await;
        record(&store, "R", "2024-01-01", TransactionType::Buy, dec!(2), dec!(4)).await;

        let tickers = store
            .list_assets()
            .await
            .iter()
            .map(|a| a.ticker().clone())
            .collect::<Vec<_>>();
        assert_eq!(tickers, vec!["A".to_string()]);

        let holdings = store.summarize_holdings().await;
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].ticker(), "A");
        assert_eq!(store.list_transactions().await.len(), 2);
    }
}
