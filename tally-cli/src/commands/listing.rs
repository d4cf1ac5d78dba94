//! Listing commands - filtered and sorted account lists, snapshot export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Month, NaiveDate};
use tally_core::adapters::json_file::write_accounts;
use tally_core::domain::month_of;

use super::{get_context, report};
use crate::output;
use crate::SourceArgs;

/// Parse a month name ("march", "Mar") or number ("3")
fn parse_month(input: &str) -> Result<Month> {
    let input = input.trim();
    if let Ok(number) = input.parse::<u32>() {
        return NaiveDate::from_ymd_opt(2000, number, 1)
            .map(|date| month_of(&date))
            .with_context(|| format!("Month number must be 1-12, got {}", number));
    }
    input
        .parse::<Month>()
        .map_err(|_| anyhow::anyhow!("Unknown month: {}", input))
}

pub fn born_in(source: &SourceArgs, month: &str, json: bool) -> Result<()> {
    let month = parse_month(month)?;
    let ctx = get_context(source)?;

    report(Ok(ctx.analytics.accounts_by_birthday_month(month)), json, |accounts| {
        if accounts.is_empty() {
            output::warning(&format!("No accounts born in {}", month.name()));
            return Ok(());
        }
        println!("{}", output::accounts_table(accounts));
        Ok(())
    })
}

pub fn sorted(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(Ok(ctx.analytics.sort_by_first_and_last_name()), json, |accounts| {
        println!("{}", output::accounts_table(accounts));
        Ok(())
    })
}

pub fn export(source: &SourceArgs, file: &Path) -> Result<()> {
    let ctx = get_context(source)?;
    write_accounts(file, ctx.analytics.accounts())
        .with_context(|| format!("Failed to export snapshot to {:?}", file))?;
    output::success(&format!(
        "Exported {} accounts from {} source to {}",
        ctx.analytics.len(),
        ctx.source_name,
        file.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("3").unwrap(), Month::March);
        assert_eq!(parse_month("december").unwrap(), Month::December);
        assert_eq!(parse_month("Feb").unwrap(), Month::February);
        assert!(parse_month("13").is_err());
        assert!(parse_month("0").is_err());
        assert!(parse_month("smarch").is_err());
    }
}
