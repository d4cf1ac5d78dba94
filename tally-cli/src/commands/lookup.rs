//! Lookup commands - single values computed over the snapshot

use anyhow::Result;
use colored::Colorize;

use super::{get_context, report};
use crate::output;
use crate::SourceArgs;

pub fn richest(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(Ok(ctx.analytics.richest_account()), json, |richest| {
        match richest {
            Some(account) => {
                println!("{}", "Richest Account".bold());
                println!("{}", output::accounts_table([account]));
            }
            None => output::warning("Snapshot has no accounts"),
        }
        Ok(())
    })
}

pub fn total(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(ctx.analytics.total_balance(), json, |total| {
        println!(
            "Total balance of {} accounts: {}",
            ctx.analytics.len(),
            total.to_string().bold()
        );
        Ok(())
    })
}

pub fn has_domain(source: &SourceArgs, domain: &str, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(ctx.analytics.contains_email_domain(domain), json, |found| {
        if found {
            output::success(&format!("At least one account uses @{}", domain));
        } else {
            output::warning(&format!("No account uses @{}", domain));
        }
        Ok(())
    })
}

pub fn balance(source: &SourceArgs, email: &str, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(ctx.analytics.balance_by_email(email), json, |balance| {
        println!("{}: {}", email, balance.to_string().bold());
        Ok(())
    })
}

pub fn letters(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(Ok(ctx.analytics.count_letters_in_names()), json, |count| {
        println!("Characters in first and last names: {}", count.to_string().bold());
        Ok(())
    })
}
