//! Account domain model

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Calendar month of any chrono date or datetime
pub fn month_of(date: &impl Datelike) -> Month {
    // `Datelike::month` is always 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

/// Account holder's sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "MALE",
            Sex::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "MALE" | "M" => Ok(Sex::Male),
            "FEMALE" | "F" => Ok(Sex::Female),
            other => Err(Error::validation(format!("unknown sex '{}'", other))),
        }
    }
}

/// A customer account as captured in a snapshot
///
/// Accounts are plain values: the analytics engine only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    /// Only the month is used by analytics
    pub birthday: NaiveDate,
    /// Only the year and month are used by analytics
    pub creation_date: NaiveDateTime,
    /// Exactly one `@` separating local part and domain
    pub email: String,
    /// Decimal string in JSON; numbers are rejected rather than rounded
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

impl Account {
    /// Create a new account with all fields
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        sex: Sex,
        birthday: NaiveDate,
        creation_date: NaiveDateTime,
        email: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            sex,
            birthday,
            creation_date,
            email: email.into(),
            balance,
        }
    }

    /// Domain part of the email, `None` when the address has no `@`
    pub fn email_domain(&self) -> Option<&str> {
        self.email.split_once('@').map(|(_, domain)| domain)
    }

    pub fn birthday_month(&self) -> Month {
        month_of(&self.birthday)
    }

    pub fn creation_month(&self) -> Month {
        month_of(&self.creation_date)
    }

    pub fn creation_year(&self) -> i32 {
        self.creation_date.year()
    }

    /// Validate account data
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() {
            return Err(Error::validation(format!(
                "account {}: first name cannot be empty",
                self.id
            )));
        }
        if self.last_name.trim().is_empty() {
            return Err(Error::validation(format!(
                "account {}: last name cannot be empty",
                self.id
            )));
        }
        match self.email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(Error::validation(format!(
                "account {}: email '{}' must contain exactly one '@'",
                self.id, self.email
            ))),
        }
    }
}
