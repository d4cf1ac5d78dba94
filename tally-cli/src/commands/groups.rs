//! Grouping commands - partitions and per-key aggregates

use anyhow::Result;
use chrono::Month;
use colored::Colorize;
use indexmap::IndexMap;
use serde::Serialize;
use tally_core::Account;

use super::{get_context, report};
use crate::output;
use crate::SourceArgs;

#[derive(Serialize)]
struct SexPartition<'a> {
    male: Vec<&'a Account>,
    female: Vec<&'a Account>,
}

/// Month keys rendered by name ("January", ...)
fn by_month_name<V>(groups: IndexMap<Month, V>) -> IndexMap<&'static str, V> {
    groups
        .into_iter()
        .map(|(month, value)| (month.name(), value))
        .collect()
}

pub fn by_sex(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    let mut partition = ctx.analytics.partition_by_sex();
    let data = SexPartition {
        male: partition.swap_remove(&true).unwrap_or_default(),
        female: partition.swap_remove(&false).unwrap_or_default(),
    };

    report(Ok(data), json, |data| {
        println!("{} ({})", "Male".bold(), data.male.len());
        println!("{}", output::accounts_table(data.male));
        println!();
        println!("{} ({})", "Female".bold(), data.female.len());
        println!("{}", output::accounts_table(data.female));
        Ok(())
    })
}

pub fn by_domain(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(ctx.analytics.group_by_email_domain(), json, |groups| {
        let mut table = output::create_table();
        table.set_header(vec!["Domain", "Accounts", "IDs"]);
        for (domain, accounts) in &groups {
            let ids: Vec<String> = accounts.iter().map(|a| a.id.to_string()).collect();
            table.add_row(vec![
                domain.to_string(),
                accounts.len().to_string(),
                ids.join(", "),
            ]);
        }
        println!("{}", table);
        Ok(())
    })
}

pub fn first_names(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    // Sets are unordered; sort them so output is stable between runs
    let groups: IndexMap<&str, Vec<&str>> = ctx
        .analytics
        .group_first_names_by_last_name()
        .into_iter()
        .map(|(last_name, first_names)| {
            let mut first_names: Vec<&str> = first_names.into_iter().collect();
            first_names.sort_unstable();
            (last_name, first_names)
        })
        .collect();

    report(Ok(groups), json, |groups| {
        let mut table = output::create_table();
        table.set_header(vec!["Last Name", "First Names"]);
        for (last_name, first_names) in &groups {
            table.add_row(vec![last_name.to_string(), first_names.join(", ")]);
        }
        println!("{}", table);
        Ok(())
    })
}

pub fn birthday_names(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    let groups = by_month_name(
        ctx.analytics
            .group_comma_separated_first_names_by_birthday_month(),
    );

    report(Ok(groups), json, |groups| {
        let mut table = output::create_table();
        table.set_header(vec!["Birthday Month", "First Names"]);
        for (month, names) in groups {
            table.add_row(vec![month.to_string(), names]);
        }
        println!("{}", table);
        Ok(())
    })
}

pub fn creation_totals(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    let totals = ctx
        .analytics
        .group_total_balance_by_creation_month()
        .map(by_month_name);

    report(totals, json, |totals| {
        let mut table = output::create_table();
        table.set_header(vec!["Creation Month", "Total Balance"]);
        for (month, total) in &totals {
            table.add_row(vec![month.to_string(), total.to_string()]);
        }
        let grand_total = ctx.analytics.total_balance()?;
        table.add_row(vec!["All".to_string(), grand_total.to_string()]);
        println!("{}", table);
        Ok(())
    })
}

pub fn index(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(ctx.analytics.index_by_id(), json, |index| {
        println!("{}", output::accounts_table(index.values().copied()));
        output::info(&format!("{} unique ids", index.len()));
        Ok(())
    })
}

pub fn year_balances(source: &SourceArgs, year: i32, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(ctx.analytics.balances_by_email_for_year(year), json, |balances| {
        if balances.is_empty() {
            output::warning(&format!("No accounts created in {}", year));
            return Ok(());
        }
        let mut table = output::create_table();
        table.set_header(vec!["Email", "Balance"]);
        for (email, balance) in &balances {
            table.add_row(vec![email.to_string(), balance.to_string()]);
        }
        println!("{}", table);
        Ok(())
    })
}
