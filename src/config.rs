use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

pub const DEFAULT_DATABASE: &str = "portfolio.db";
pub const DEFAULT_DASHBOARD_LOG: &str = "finance-tracker.log";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolves paths from command line values (which clap already falls back
    /// to environment variables for). The dashboard owns the terminal, so it
    /// always logs to a file.
    pub fn resolve(
        database: Option<&str>,
        log_file: Option<&str>,
        interactive: bool,
    ) -> Result<Self> {
        let database_path = expand_path(database.unwrap_or(DEFAULT_DATABASE));
        let log_file = match log_file {
            Some(path) => Some(expand_path(path)),
            None if interactive => Some(PathBuf::from(DEFAULT_DASHBOARD_LOG)),
            None => None,
        };

        if let Some(parent) = database_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory '{}'", parent.display())
            })?;
        }

        Ok(Self {
            database_path,
            log_file,
        })
    }

    pub fn init_logging(&self) -> Result<()> {
        let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

        if let Some(path) = &self.log_file {
            builder.target(Target::Pipe(Box::new(open_log_file(path)?)));
        }

        builder
            .try_init()
            .context("Failed to initialize logging")
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))
}
