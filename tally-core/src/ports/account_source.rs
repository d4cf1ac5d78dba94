//! Account source port
//!
//! Defines the interface for loading a snapshot of accounts from outside the
//! core (JSON or CSV files, generated demo data, etc.)

use crate::domain::result::Result;
use crate::domain::Account;

/// Account source trait
///
/// Implementations produce the full snapshot in a stable order. Every
/// returned account has passed `Account::validate`; a single invalid record
/// fails the whole load.
pub trait AccountSource: Send + Sync {
    /// Source name (e.g., "json", "csv", "demo")
    fn name(&self) -> &str;

    /// Load every account the source holds
    fn load_accounts(&self) -> Result<Vec<Account>>;
}
