//! Tally CLI - account snapshot analytics in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod output;

use commands::{demo, frequency, groups, listing, lookup};

/// Tally - read-only analytics over account snapshots
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the account snapshot comes from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Account snapshot to analyse (.json or .csv), overrides settings
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
    /// Analyse generated demo accounts instead of a file
    #[arg(long, global = true)]
    pub demo: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the account with the highest balance
    Richest {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the exact sum of all balances
    Total {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether any account uses an email domain
    HasDomain {
        /// Domain to look for, e.g. gmail.com (case-sensitive)
        domain: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the balance of the account with an email
    Balance {
        /// Exact email address
        email: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count characters in all first and last names
    Letters {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split accounts into male and female
    BySex {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Group accounts by email domain
    ByDomain {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List distinct first names for each last name
    FirstNames {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List first names for each birthday month
    BirthdayNames {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sum balances by account creation month
    CreationTotals {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Index accounts by id (fails on duplicate ids)
    Index {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Balances by email for accounts created in a year
    YearBalances {
        /// Creation year
        year: i32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts born in a month
    BornIn {
        /// Month name (e.g. march, mar) or number 1-12
        month: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts sorted by first and last name
    Sorted {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Character counts in first names (case-sensitive)
    FirstNameFrequency {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Character counts in first and last names (case-insensitive)
    NameFrequency {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the loaded snapshot to a JSON file
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let source = cli.source;
    match cli.command {
        Commands::Richest { json } => lookup::richest(&source, json),
        Commands::Total { json } => lookup::total(&source, json),
        Commands::HasDomain { domain, json } => lookup::has_domain(&source, &domain, json),
        Commands::Balance { email, json } => lookup::balance(&source, &email, json),
        Commands::Letters { json } => lookup::letters(&source, json),
        Commands::BySex { json } => groups::by_sex(&source, json),
        Commands::ByDomain { json } => groups::by_domain(&source, json),
        Commands::FirstNames { json } => groups::first_names(&source, json),
        Commands::BirthdayNames { json } => groups::birthday_names(&source, json),
        Commands::CreationTotals { json } => groups::creation_totals(&source, json),
        Commands::Index { json } => groups::index(&source, json),
        Commands::YearBalances { year, json } => groups::year_balances(&source, year, json),
        Commands::BornIn { month, json } => listing::born_in(&source, &month, json),
        Commands::Sorted { json } => listing::sorted(&source, json),
        Commands::FirstNameFrequency { json } => frequency::first_names(&source, json),
        Commands::NameFrequency { json } => frequency::all_names(&source, json),
        Commands::Export { file } => listing::export(&source, &file),
        Commands::Demo { command } => demo::run(command),
    }
}
