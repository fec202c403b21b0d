use derive_getters::Getters;
use log::info;

use crate::{
    app::calc::{self, PortfolioSummary},
    db::LedgerStore,
    models::{Asset, BusinessInsights, Holding, Transaction},
};

/// Last snapshot of every dashboard view, read through the ledger store.
#[derive(Clone, Debug, Getters)]
pub struct Portfolio {
    #[getter(skip)]
    store: LedgerStore,
    assets: Vec<Asset>,
    transactions: Vec<Transaction>,
    holdings: Vec<Holding>,
    summary: PortfolioSummary,
    insights: Option<BusinessInsights>,
}

impl Portfolio {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            assets: Vec::new(),
            transactions: Vec::new(),
            holdings: Vec::new(),
            summary: PortfolioSummary::default(),
            insights: None,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Re-reads all views, one store call after another.
    pub async fn refresh(&mut self) {
        self.holdings = self.store.summarize_holdings().await;
        self.summary = calc::summarize(&self.holdings);
        self.assets = self.store.list_assets().await;
        self.transactions = self.store.list_transactions().await;
        self.insights = self.store.summarize_business_insights().await;

        info!(
            "Refreshed portfolio: {} asset(s), {} transaction(s), {} holding(s)",
            self.assets.len(),
            self.transactions.len(),
            self.holdings.len()
        );
    }

    /// Deletes a transaction and, if the store reports success, reloads every view.
    pub async fn delete_transaction(&mut self, id: i64) -> bool {
        let deleted = self.store.delete_transaction(id).await;
        if deleted {
            self.refresh().await;
        }
        deleted
    }
}
