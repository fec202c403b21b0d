pub mod app;
pub mod calc;
pub mod portfolio;
pub mod ui;
pub mod utils;

pub use app::{App, Tab};
pub use portfolio::Portfolio;
