use anyhow::Result;
use clap::Parser;
use finance_tracker::{
    app::{App, Portfolio},
    cli::{self, Cli},
    config::Config,
    db::{LedgerStore, init_schema},
};
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::resolve(
        cli.database.as_deref(),
        cli.log_file.as_deref(),
        cli.command.is_none(),
    )?;
    config.init_logging()?;

    info!("Using ledger at {}", config.database_path.display());
    let store = LedgerStore::open(&config.database_path);
    init_schema(&store).await?;

    match cli.command {
        Some(command) => cli::execute(command, &store).await,
        None => {
            let portfolio = Portfolio::new(store);
            let mut app = App::new(portfolio);
            app.run().await
        }
    }
}
