//! Adapter implementations
//!
//! Adapters implement the `AccountSource` port:
//! - JSON array files
//! - CSV files with a header row
//! - Seeded demo data for testing and onboarding

pub mod csv_file;
pub mod demo;
pub mod json_file;

use std::path::Path;

use log::warn;

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::AccountSource;

pub use csv_file::CsvFileSource;
pub use demo::DemoSource;
pub use json_file::JsonFileSource;

/// Pick a file source from the extension (`.json` or `.csv`)
pub fn source_for_path(path: &Path) -> Result<Box<dyn AccountSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonFileSource::new(path))),
        Some("csv") => Ok(Box::new(CsvFileSource::new(path))),
        _ => Err(Error::config(format!(
            "unsupported data file {:?}: expected a .json or .csv file",
            path
        ))),
    }
}

/// Validate every loaded account, failing on the first invalid one
pub(crate) fn validate_all(accounts: Vec<Account>) -> Result<Vec<Account>> {
    for account in &accounts {
        if let Err(e) = account.validate() {
            warn!("rejecting snapshot: {}", e);
            return Err(e);
        }
    }
    Ok(accounts)
}
