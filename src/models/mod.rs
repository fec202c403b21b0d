pub mod asset;
pub mod holding;
pub mod insights;
pub mod transaction;

pub use asset::{Asset, AssetClass};
pub use holding::Holding;
pub use insights::BusinessInsights;
pub use transaction::{Transaction, TransactionType};
