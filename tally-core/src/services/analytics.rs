//! Analytics service - read-only queries over an account snapshot

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Month;
use indexmap::IndexMap;
use log::debug;
use rust_decimal::Decimal;

use super::grouping::{collect_unique, group_reduce};
use crate::domain::result::{Error, Result};
use crate::domain::{Account, Sex};

/// Query engine bound to one immutable snapshot of accounts
///
/// The snapshot is copied in at construction and never changes afterwards,
/// so every query is a pure function of it. Cloning the engine shares the
/// snapshot. Results borrow from the engine and preserve snapshot order
/// unless a query sorts or groups.
#[derive(Debug, Clone)]
pub struct AccountAnalytics {
    accounts: Arc<[Account]>,
}

impl AccountAnalytics {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts: Arc<[Account]> = accounts.into_iter().collect();
        debug!("analytics bound to snapshot of {} accounts", accounts.len());
        Self { accounts }
    }

    /// The snapshot in its original order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    // ========================================================================
    // Scalar aggregation & lookup
    // ========================================================================

    /// Account with the highest balance; the earliest one wins a tie
    pub fn richest_account(&self) -> Option<&Account> {
        self.accounts.iter().reduce(|richest, account| {
            if account.balance > richest.balance {
                account
            } else {
                richest
            }
        })
    }

    /// Exact sum of every balance, zero for an empty snapshot.
    ///
    /// A sum outside the `Decimal` range is an `Overflow` error.
    pub fn total_balance(&self) -> Result<Decimal> {
        sum_balances(self.accounts.iter())
    }

    /// True if any email's domain equals `domain` exactly (case-sensitive)
    pub fn contains_email_domain(&self, domain: &str) -> Result<bool> {
        for account in self.accounts.iter() {
            if domain_of(account)? == domain {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Balance of the first account whose email equals `email`
    pub fn balance_by_email(&self, email: &str) -> Result<Decimal> {
        self.accounts
            .iter()
            .find(|a| a.email == email)
            .map(|a| a.balance)
            .ok_or_else(|| Error::not_found(format!("Cannot find Account by email={}", email)))
    }

    /// Number of characters across all first and last names.
    ///
    /// Every character counts, including spaces, hyphens and apostrophes.
    pub fn count_letters_in_names(&self) -> usize {
        self.accounts
            .iter()
            .map(|a| a.first_name.chars().count() + a.last_name.chars().count())
            .sum()
    }

    // ========================================================================
    // Grouping & partitioning
    // ========================================================================

    /// Accounts split into male (`true`) and female (`false`).
    ///
    /// Both keys are always present, `true` first.
    pub fn partition_by_sex(&self) -> IndexMap<bool, Vec<&Account>> {
        let mut partition = group_reduce(
            self.accounts.iter(),
            |a| a.sex == Sex::Male,
            Vec::new,
            |group, a| group.push(a),
        );
        partition.entry(true).or_default();
        partition.entry(false).or_default();
        partition.sort_by(|k1, _, k2, _| k2.cmp(k1));
        partition
    }

    /// Accounts grouped by the domain part of their email
    pub fn group_by_email_domain(&self) -> Result<IndexMap<&str, Vec<&Account>>> {
        let keyed = self
            .accounts
            .iter()
            .map(|a| domain_of(a).map(|domain| (domain, a)))
            .collect::<Result<Vec<_>>>()?;

        Ok(group_reduce(
            keyed,
            |(domain, _)| *domain,
            Vec::new,
            |group, (_, a)| group.push(a),
        ))
    }

    /// Distinct first names seen for each last name
    pub fn group_first_names_by_last_name(&self) -> IndexMap<&str, HashSet<&str>> {
        group_reduce(
            self.accounts.iter(),
            |a| a.last_name.as_str(),
            HashSet::new,
            |names, a| {
                names.insert(a.first_name.as_str());
            },
        )
    }

    /// First names per birthday month, joined with ", " in snapshot order
    pub fn group_comma_separated_first_names_by_birthday_month(&self) -> IndexMap<Month, String> {
        group_reduce(
            self.accounts.iter(),
            |a| a.birthday_month(),
            Vec::new,
            |names, a| names.push(a.first_name.as_str()),
        )
        .into_iter()
        .map(|(month, names)| (month, names.join(", ")))
        .collect()
    }

    /// Exact balance total per creation month; empty months are absent
    pub fn group_total_balance_by_creation_month(&self) -> Result<IndexMap<Month, Decimal>> {
        group_reduce(
            self.accounts.iter(),
            |a| a.creation_month(),
            Vec::new,
            |group, a| group.push(a),
        )
        .into_iter()
        .map(|(month, accounts)| sum_balances(accounts).map(|total| (month, total)))
        .collect()
    }

    /// Accounts keyed by id. A repeated id is a `DuplicateKey` error.
    pub fn index_by_id(&self) -> Result<IndexMap<i64, &Account>> {
        collect_unique(self.accounts.iter().map(|a| (a.id, a)), |id| {
            format!("id={}", id)
        })
    }

    /// Balances keyed by email for accounts created in `year`.
    ///
    /// A repeated email among those accounts is a `DuplicateKey` error.
    pub fn balances_by_email_for_year(&self, year: i32) -> Result<IndexMap<&str, Decimal>> {
        let balances = collect_unique(
            self.accounts
                .iter()
                .filter(|a| a.creation_year() == year)
                .map(|a| (a.email.as_str(), a.balance)),
            |email| format!("email={}", email),
        )?;
        debug!("{} accounts created in {}", balances.len(), year);
        Ok(balances)
    }

    // ========================================================================
    // Filtering & ordering
    // ========================================================================

    pub fn accounts_by_birthday_month(&self, month: Month) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.birthday_month() == month)
            .collect()
    }

    /// Stable sort by first name, then last name (code point order)
    pub fn sort_by_first_and_last_name(&self) -> Vec<&Account> {
        let mut sorted: Vec<&Account> = self.accounts.iter().collect();
        sorted.sort_by(|a, b| {
            a.first_name
                .cmp(&b.first_name)
                .then_with(|| a.last_name.cmp(&b.last_name))
        });
        sorted
    }

    // ========================================================================
    // Character frequency
    // ========================================================================

    /// Occurrences of each character in first names, case-sensitive
    pub fn first_name_letter_frequency(&self) -> IndexMap<char, u64> {
        count_chars(self.accounts.iter().flat_map(|a| a.first_name.chars()))
    }

    /// Occurrences of each character in first and last names, lowercased
    pub fn name_letter_frequency_ignore_case(&self) -> IndexMap<char, u64> {
        count_chars(
            self.accounts
                .iter()
                .flat_map(|a| a.first_name.chars().chain(a.last_name.chars()))
                .flat_map(char::to_lowercase),
        )
    }
}

impl From<Vec<Account>> for AccountAnalytics {
    fn from(accounts: Vec<Account>) -> Self {
        Self::new(accounts)
    }
}

fn domain_of(account: &Account) -> Result<&str> {
    account
        .email_domain()
        .ok_or_else(|| Error::malformed_email(account.email.clone()))
}

fn sum_balances<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Result<Decimal> {
    accounts.into_iter().try_fold(Decimal::ZERO, |total, account| {
        total.checked_add(account.balance).ok_or_else(|| {
            Error::overflow(format!("sum exceeds decimal range at account id={}", account.id))
        })
    })
}

fn count_chars(chars: impl Iterator<Item = char>) -> IndexMap<char, u64> {
    group_reduce(chars, |c| *c, || 0, |count, _| *count += 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn account(id: i64, first: &str, last: &str, email: &str, balance: Decimal) -> Account {
        Account::new(
            id,
            first,
            last,
            if id % 2 == 0 { Sex::Female } else { Sex::Male },
            NaiveDate::from_ymd_opt(1990, 1 + (id % 12) as u32, 10).unwrap(),
            NaiveDate::from_ymd_opt(2019 + (id % 2) as i32, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            email,
            balance,
        )
    }

    fn sample() -> AccountAnalytics {
        AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", dec!(10)),
            account(2, "Bob", "Kim", "b@x.com", dec!(30)),
            account(3, "Cid", "Lee", "c@y.com", dec!(5)),
        ])
    }

    #[test]
    fn test_richest_account() {
        assert_eq!(sample().richest_account().unwrap().id, 2);
        assert!(AccountAnalytics::new(vec![]).richest_account().is_none());
    }

    #[test]
    fn test_richest_account_first_wins_on_tie() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", dec!(5)),
            account(2, "Bob", "Kim", "b@x.com", dec!(30.00)),
            account(3, "Cid", "Lee", "c@y.com", dec!(30)),
        ]);
        assert_eq!(analytics.richest_account().unwrap().id, 2);
    }

    #[test]
    fn test_total_balance() {
        assert_eq!(sample().total_balance().unwrap(), dec!(45));
        assert_eq!(AccountAnalytics::new(vec![]).total_balance().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_balance_is_exact() {
        let analytics = AccountAnalytics::new(
            (1..=10).map(|id| account(id, "Ann", "Lee", &format!("{id}@x.com"), dec!(0.1))),
        );
        assert_eq!(analytics.total_balance().unwrap(), dec!(1.0));
    }

    #[test]
    fn test_total_balance_overflow_is_an_error() {
        let huge = Decimal::MAX - dec!(1);
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", huge),
            account(2, "Bob", "Kim", "b@x.com", dec!(1)),
            account(3, "Cid", "Lee", "c@y.com", huge),
        ]);
        assert!(matches!(
            analytics.total_balance(),
            Err(Error::Overflow(msg)) if msg.contains("id=3")
        ));

        assert!(matches!(
            analytics.group_total_balance_by_creation_month(),
            Err(Error::Overflow(_))
        ));

        // Each month fits on its own even though the overall sum does not
        let mut march = account(2, "Bob", "Kim", "b@x.com", huge);
        march.creation_date = NaiveDate::from_ymd_opt(2020, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let analytics =
            AccountAnalytics::new(vec![account(1, "Ann", "Lee", "a@x.com", huge), march]);
        let totals = analytics.group_total_balance_by_creation_month().unwrap();
        assert_eq!(totals[&Month::June], huge);
        assert_eq!(totals[&Month::March], huge);
        assert!(analytics.total_balance().is_err());
    }

    #[test]
    fn test_contains_email_domain() {
        let analytics = sample();
        assert!(analytics.contains_email_domain("y.com").unwrap());
        assert!(!analytics.contains_email_domain("Y.COM").unwrap());
        assert!(!analytics.contains_email_domain("z.com").unwrap());
    }

    #[test]
    fn test_malformed_email_is_reported() {
        let analytics = AccountAnalytics::new(vec![account(1, "Ann", "Lee", "nobody", dec!(1))]);
        assert!(matches!(
            analytics.contains_email_domain("x.com"),
            Err(Error::MalformedEmail(email)) if email == "nobody"
        ));
        assert!(analytics.group_by_email_domain().is_err());
    }

    #[test]
    fn test_balance_by_email() {
        let analytics = sample();
        assert_eq!(analytics.balance_by_email("c@y.com").unwrap(), dec!(5));

        let err = analytics.balance_by_email("z@z.com").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "Not found: Cannot find Account by email=z@z.com");
    }

    #[test]
    fn test_count_letters_in_names() {
        assert_eq!(sample().count_letters_in_names(), 18);

        let analytics = AccountAnalytics::new(vec![account(1, "Jo Ann", "O'Neil", "a@x.com", dec!(1))]);
        assert_eq!(analytics.count_letters_in_names(), 12);
    }

    #[test]
    fn test_partition_by_sex() {
        let analytics = sample();
        let partition = analytics.partition_by_sex();
        let keys: Vec<bool> = partition.keys().copied().collect();
        assert_eq!(keys, vec![true, false]);
        let male: Vec<i64> = partition[&true].iter().map(|a| a.id).collect();
        assert_eq!(male, vec![1, 3]);
        assert_eq!(partition[&false][0].id, 2);
    }

    #[test]
    fn test_partition_by_sex_keeps_empty_group() {
        let analytics = AccountAnalytics::new(vec![account(1, "Ann", "Lee", "a@x.com", dec!(1))]);
        let partition = analytics.partition_by_sex();
        assert_eq!(partition.len(), 2);
        assert!(partition[&false].is_empty());

        let empty = AccountAnalytics::new(vec![]);
        let partition = empty.partition_by_sex();
        assert_eq!(partition.len(), 2);
        assert!(partition.values().all(Vec::is_empty));
    }

    #[test]
    fn test_group_by_email_domain() {
        let analytics = sample();
        let groups = analytics.group_by_email_domain().unwrap();
        let shape: Vec<(&str, Vec<i64>)> = groups
            .iter()
            .map(|(domain, accounts)| (*domain, accounts.iter().map(|a| a.id).collect()))
            .collect();
        assert_eq!(shape, vec![("x.com", vec![1, 2]), ("y.com", vec![3])]);
    }

    #[test]
    fn test_group_first_names_by_last_name() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", dec!(1)),
            account(2, "Bob", "Kim", "b@x.com", dec!(1)),
            account(3, "Ann", "Lee", "c@x.com", dec!(1)),
            account(4, "Cid", "Lee", "d@x.com", dec!(1)),
        ]);
        let groups = analytics.group_first_names_by_last_name();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Lee"], HashSet::from(["Ann", "Cid"]));
        assert_eq!(groups["Kim"], HashSet::from(["Bob"]));
    }

    #[test]
    fn test_group_comma_separated_first_names_by_birthday_month() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "Polly", "Lee", "a@x.com", dec!(1)),
            account(13, "Dylan", "Kim", "b@x.com", dec!(1)),
            account(2, "Bob", "Kim", "c@x.com", dec!(1)),
            account(25, "Clark", "Lee", "d@x.com", dec!(1)),
        ]);
        let groups = analytics.group_comma_separated_first_names_by_birthday_month();
        assert_eq!(groups[&Month::February], "Polly, Dylan, Clark");
        assert_eq!(groups[&Month::March], "Bob");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_group_total_balance_by_creation_month() {
        let mut december = account(3, "Cid", "Lee", "c@y.com", dec!(0.05));
        december.creation_date = NaiveDate::from_ymd_opt(2020, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", dec!(10.10)),
            account(2, "Bob", "Kim", "b@x.com", dec!(0.20)),
            december,
        ]);

        let totals = analytics.group_total_balance_by_creation_month().unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&Month::June], dec!(10.30));
        assert_eq!(totals[&Month::December], dec!(0.05));
        assert!(!totals.contains_key(&Month::January));
    }

    #[test]
    fn test_index_by_id() {
        let analytics = sample();
        let index = analytics.index_by_id().unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index[&3].email, "c@y.com");
    }

    #[test]
    fn test_index_by_id_rejects_duplicates() {
        let analytics = AccountAnalytics::new(vec![
            account(7, "Ann", "Lee", "a@x.com", dec!(1)),
            account(7, "Bob", "Kim", "b@x.com", dec!(2)),
        ]);
        let err = analytics.index_by_id().unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref key) if key == "id=7"));
    }

    #[test]
    fn test_balances_by_email_for_year() {
        let analytics = sample();
        let balances = analytics.balances_by_email_for_year(2020).unwrap();
        let expected: IndexMap<&str, Decimal> =
            IndexMap::from([("a@x.com", dec!(10)), ("c@y.com", dec!(5))]);
        assert_eq!(balances, expected);
        assert!(analytics.balances_by_email_for_year(1999).unwrap().is_empty());
    }

    #[test]
    fn test_balances_by_email_for_year_rejects_duplicate_email() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "same@x.com", dec!(1)),
            account(2, "Bob", "Kim", "other@x.com", dec!(2)),
            account(3, "Cid", "Lee", "same@x.com", dec!(3)),
        ]);
        assert!(matches!(
            analytics.balances_by_email_for_year(2020),
            Err(Error::DuplicateKey(key)) if key == "email=same@x.com"
        ));
        // Only the filtered subset matters
        assert_eq!(analytics.balances_by_email_for_year(2019).unwrap().len(), 1);
    }

    #[test]
    fn test_accounts_by_birthday_month() {
        let analytics = sample();
        let february = analytics.accounts_by_birthday_month(Month::February);
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].id, 1);
        assert!(analytics.accounts_by_birthday_month(Month::August).is_empty());
    }

    #[test]
    fn test_sort_by_first_and_last_name_is_stable() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "bob", "Kim", "a@x.com", dec!(1)),
            account(2, "Bob", "Lee", "b@x.com", dec!(1)),
            account(3, "Ann", "Lee", "c@x.com", dec!(1)),
            account(4, "Bob", "Kim", "d@x.com", dec!(1)),
            account(5, "Bob", "Kim", "e@x.com", dec!(1)),
        ]);
        let ids: Vec<i64> = analytics
            .sort_by_first_and_last_name()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![3, 4, 5, 2, 1]);

        let original: Vec<i64> = analytics.accounts().iter().map(|a| a.id).collect();
        assert_eq!(original, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_first_name_letter_frequency_is_case_sensitive() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", dec!(1)),
            account(2, "ann", "Kim", "b@x.com", dec!(1)),
        ]);
        let frequency = analytics.first_name_letter_frequency();
        assert_eq!(frequency[&'A'], 1);
        assert_eq!(frequency[&'a'], 1);
        assert_eq!(frequency[&'n'], 4);
        assert_eq!(frequency.len(), 3);
    }

    #[test]
    fn test_name_letter_frequency_ignore_case() {
        let analytics = AccountAnalytics::new(vec![
            account(1, "Ann", "Lee", "a@x.com", dec!(1)),
            account(2, "ann", "LEE", "b@x.com", dec!(1)),
        ]);
        let frequency = analytics.name_letter_frequency_ignore_case();
        assert_eq!(frequency[&'a'], 2);
        assert_eq!(frequency[&'n'], 4);
        assert_eq!(frequency[&'l'], 2);
        assert_eq!(frequency[&'e'], 4);
        assert!(!frequency.contains_key(&'A'));
        assert!(!frequency.contains_key(&'L'));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let analytics = sample();
        assert_eq!(analytics.sort_by_first_and_last_name(), analytics.sort_by_first_and_last_name());
        assert_eq!(
            analytics.group_by_email_domain().unwrap(),
            analytics.group_by_email_domain().unwrap()
        );
        assert_eq!(
            analytics.total_balance().unwrap(),
            analytics.total_balance().unwrap()
        );
    }
}
