//! Demo data provider
//!
//! Generates a reproducible population of accounts from a seed:
//! - sequential ids starting at 1
//! - names drawn from fixed pools matching the account's sex
//! - emails on a small set of common domains
//! - balances between $0.00 and $200,000.00 with cent precision

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{Account, Sex};
use crate::ports::AccountSource;

pub const DEFAULT_DEMO_SEED: u64 = 42;
pub const DEFAULT_DEMO_SIZE: usize = 50;

const MALE_NAMES: [&str; 10] = [
    "Dylan", "Clark", "Oliver", "Jacob", "Noah", "Ethan", "Lucas", "Mason", "Logan", "Owen",
];
const FEMALE_NAMES: [&str; 10] = [
    "Polly", "Emma", "Olivia", "Ava", "Sophia", "Mia", "Amelia", "Harper", "Ella", "Grace",
];
const LAST_NAMES: [&str; 12] = [
    "Smith", "Johnson", "Brown", "Taylor", "Miller", "Wilson", "Moore", "Anderson", "Thomas",
    "Jackson", "White", "Harris",
];
const DOMAINS: [&str; 5] = ["gmail.com", "yahoo.com", "outlook.com", "proton.me", "icloud.com"];

/// Account source backed by the seeded generator
pub struct DemoSource {
    seed: u64,
    size: usize,
}

impl DemoSource {
    pub fn new(seed: u64, size: usize) -> Self {
        Self { seed, size }
    }
}

impl AccountSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn load_accounts(&self) -> Result<Vec<Account>> {
        Ok(generate_demo_accounts(self.seed, self.size))
    }
}

/// Generate `size` demo accounts; the same seed always yields the same accounts
pub fn generate_demo_accounts(seed: u64, size: usize) -> Vec<Account> {
    let mut rng = StdRng::seed_from_u64(seed);
    let accounts: Vec<Account> = (1..=size as i64)
        .map(|id| generate_account(&mut rng, id))
        .collect();
    debug!("generated {} demo accounts from seed {}", accounts.len(), seed);
    accounts
}

fn generate_account(rng: &mut StdRng, id: i64) -> Account {
    let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
    let pool: &[&str] = match sex {
        Sex::Male => &MALE_NAMES,
        Sex::Female => &FEMALE_NAMES,
    };
    // Pools are non-empty constants
    let first_name = pool.choose(rng).copied().unwrap_or("Alex");
    let last_name = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    let domain = DOMAINS.choose(rng).copied().unwrap_or("example.com");

    let email = format!(
        "{}.{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        id,
        domain
    );

    Account::new(
        id,
        first_name,
        last_name,
        sex,
        random_date(rng, 1950, 2004),
        random_datetime(rng, 2010, 2024),
        email,
        Decimal::new(rng.gen_range(0..=20_000_000), 2),
    )
}

fn random_date(rng: &mut StdRng, from_year: i32, to_year: i32) -> NaiveDate {
    let year = rng.gen_range(from_year..to_year);
    let month = rng.gen_range(1..=12);
    // Day 28 exists in every month
    let day = rng.gen_range(1..=28);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn random_datetime(rng: &mut StdRng, from_year: i32, to_year: i32) -> NaiveDateTime {
    let date = random_date(rng, from_year, to_year);
    date.and_hms_opt(rng.gen_range(0..24), rng.gen_range(0..60), rng.gen_range(0..60))
        .unwrap_or_default()
}
