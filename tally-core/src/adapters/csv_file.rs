//! CSV account source
//!
//! Expects a header row naming the columns
//! `id,firstName,lastName,sex,birthday,creationDate,email,balance`
//! in any order. Extra columns are ignored.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use log::{info, warn};
use rust_decimal::Decimal;

use super::validate_all;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, Sex};
use crate::ports::AccountSource;

const COLUMNS: [&str; 8] = [
    "id",
    "firstName",
    "lastName",
    "sex",
    "birthday",
    "creationDate",
    "email",
    "balance",
];

/// Loads accounts from a CSV file with a header row
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountSource for CsvFileSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn load_accounts(&self) -> Result<Vec<Account>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        // Column index for each of COLUMNS, in the same order
        let mut indices = [0usize; 8];
        for (slot, column) in indices.iter_mut().zip(COLUMNS) {
            *slot = headers.iter().position(|h| h.trim() == column).ok_or_else(|| {
                Error::validation(format!("CSV column '{}' not found", column))
            })?;
        }

        let mut accounts = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let account = parse_record(&record, &indices).map_err(|e| {
                // Header is line 1
                warn!("rejecting CSV line {}: {}", row + 2, e);
                Error::validation(format!("line {}: {}", row + 2, e))
            })?;
            accounts.push(account);
        }

        info!("loaded {} accounts from {:?}", accounts.len(), self.path);
        validate_all(accounts)
    }
}

fn parse_record(record: &StringRecord, indices: &[usize; 8]) -> std::result::Result<Account, String> {
    let field = |i: usize| record.get(indices[i]).unwrap_or("").trim();

    let id: i64 = field(0)
        .parse()
        .map_err(|_| format!("invalid id '{}'", field(0)))?;
    let sex: Sex = field(3).parse().map_err(|e: Error| e.to_string())?;
    let birthday = parse_date(field(4)).ok_or_else(|| format!("invalid birthday '{}'", field(4)))?;
    let creation_date = parse_datetime(field(5))
        .ok_or_else(|| format!("invalid creationDate '{}'", field(5)))?;
    let balance: Decimal = field(7)
        .parse()
        .map_err(|_| format!("invalid balance '{}'", field(7)))?;

    Ok(Account::new(
        id,
        field(1),
        field(2),
        sex,
        birthday,
        creation_date,
        field(6),
        balance,
    ))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d"];

    for fmt in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    None
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    for fmt in &formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(datetime);
        }
    }
    // Date-only values mean midnight
    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0))
}
