//! Frequency commands - character counts in names

use anyhow::Result;
use indexmap::IndexMap;

use super::{get_context, report};
use crate::output;
use crate::SourceArgs;

pub fn first_names(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(Ok(ctx.analytics.first_name_letter_frequency()), json, print_frequency)
}

pub fn all_names(source: &SourceArgs, json: bool) -> Result<()> {
    let ctx = get_context(source)?;
    report(
        Ok(ctx.analytics.name_letter_frequency_ignore_case()),
        json,
        print_frequency,
    )
}

/// Most frequent first; ties keep first-seen order
fn print_frequency(frequency: IndexMap<char, u64>) -> Result<()> {
    let mut rows: Vec<(char, u64)> = frequency.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let mut table = output::create_table();
    table.set_header(vec!["Character", "Count"]);
    for (c, count) in rows {
        table.add_row(vec![format!("{:?}", c), count.to_string()]);
    }
    println!("{}", table);
    Ok(())
}
