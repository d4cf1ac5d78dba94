//! Tally Core - Read-only analytics over account snapshots
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Core entities (Account, Sex) and error types
//! - **ports**: Trait definitions for external dependencies (AccountSource)
//! - **services**: The analytics engine and its grouping primitives
//! - **adapters**: Concrete sources (JSON, CSV, demo data)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use config::Config;
use ports::AccountSource;

// Re-export commonly used types at crate root
pub use domain::{Account, Sex};
pub use domain::result::{Error, OperationResult};
pub use services::AccountAnalytics;

/// Main context for Tally operations
///
/// Holds the configuration and the analytics engine bound to the snapshot
/// the configuration points at.
pub struct TallyContext {
    pub config: Config,
    /// Name of the source the snapshot came from ("json", "csv", "demo")
    pub source_name: String,
    pub analytics: AccountAnalytics,
}

impl TallyContext {
    /// Create a new Tally context from the settings in `tally_dir`
    pub fn new(tally_dir: &Path) -> Result<Self> {
        let config = Config::load(tally_dir)?;
        Self::from_config(config)
    }

    /// Create a context from an already-resolved configuration
    ///
    /// Demo mode wins over a configured data file.
    pub fn from_config(config: Config) -> Result<Self> {
        let source = select_source(&config)?;
        let accounts = source
            .load_accounts()
            .with_context(|| format!("Failed to load accounts from {} source", source.name()))?;
        info!("{} source provided {} accounts", source.name(), accounts.len());

        Ok(Self {
            source_name: source.name().to_string(),
            analytics: AccountAnalytics::new(accounts),
            config,
        })
    }

    /// Create a context around accounts supplied by the caller
    pub fn from_accounts(config: Config, accounts: Vec<Account>) -> Self {
        Self {
            config,
            source_name: "memory".to_string(),
            analytics: AccountAnalytics::new(accounts),
        }
    }
}

fn select_source(config: &Config) -> Result<Box<dyn AccountSource>> {
    if config.demo_mode {
        return Ok(Box::new(adapters::DemoSource::new(
            config.demo_seed,
            config.demo_size,
        )));
    }

    match &config.data_file {
        Some(path) => Ok(adapters::source_for_path(path)?),
        None => Err(Error::config(
            "no data file configured: set TALLY_DATA_FILE, pass --data, or enable demo mode",
        )
        .into()),
    }
}
