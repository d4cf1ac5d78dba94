//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;
use tally_core::{Account, OperationResult};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Table with one row per account, in the given order
pub fn accounts_table<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Table {
    let mut table = create_table();
    table.set_header(vec![
        "ID", "First", "Last", "Sex", "Birthday", "Created", "Email", "Balance",
    ]);
    for account in accounts {
        table.add_row(vec![
            account.id.to_string(),
            account.first_name.clone(),
            account.last_name.clone(),
            account.sex.to_string(),
            account.birthday.to_string(),
            account.creation_date.format("%Y-%m-%d %H:%M").to_string(),
            account.email.clone(),
            account.balance.to_string(),
        ]);
    }
    table
}

/// Print a successful JSON envelope
pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&OperationResult::ok(data))?);
    Ok(())
}

/// Print a failed JSON envelope
pub fn print_json_error(message: &str) -> anyhow::Result<()> {
    let envelope: OperationResult<()> = OperationResult::fail(message);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
