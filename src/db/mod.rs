pub mod init;
pub mod store;
pub mod summary;
pub mod utils;

pub use init::init_schema;
pub use store::LedgerStore;
