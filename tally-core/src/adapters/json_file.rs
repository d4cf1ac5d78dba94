//! JSON account source
//!
//! The file holds a single array of accounts:
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "firstName": "Polly",
//!     "lastName": "Clark",
//!     "sex": "FEMALE",
//!     "birthday": "1990-03-14",
//!     "creationDate": "2018-11-02T09:30:00",
//!     "email": "polly@gmail.com",
//!     "balance": "125.50"
//!   }
//! ]
//! ```
//! Balances must be decimal strings so they are read exactly. A balance
//! written as a JSON number fails the load.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;

use super::validate_all;
use crate::domain::result::Result;
use crate::domain::Account;
use crate::ports::AccountSource;

/// Loads accounts from a JSON array file
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountSource for JsonFileSource {
    fn name(&self) -> &str {
        "json"
    }

    fn load_accounts(&self) -> Result<Vec<Account>> {
        let file = std::fs::File::open(&self.path)?;
        let accounts: Vec<Account> = serde_json::from_reader(BufReader::new(file))?;
        info!("loaded {} accounts from {:?}", accounts.len(), self.path);
        validate_all(accounts)
    }
}

/// Write accounts as a pretty-printed JSON array readable by `JsonFileSource`
pub fn write_accounts(path: &Path, accounts: &[Account]) -> Result<()> {
    let content = serde_json::to_string_pretty(accounts)?;
    std::fs::write(path, content)?;
    info!("wrote {} accounts to {:?}", accounts.len(), path);
    Ok(())
}
