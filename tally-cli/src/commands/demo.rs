//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use tally_core::config::Config;

use super::get_tally_dir;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On {
        /// Seed for the generated accounts
        #[arg(long)]
        seed: Option<u64>,
        /// Number of accounts to generate
        #[arg(long)]
        size: Option<usize>,
    },
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let tally_dir = get_tally_dir()?;
    std::fs::create_dir_all(&tally_dir)?;
    let mut config = Config::load_file(&tally_dir)?;

    match command {
        Some(DemoCommands::On { seed, size }) => {
            config.enable_demo_mode();
            if let Some(seed) = seed {
                config.demo_seed = seed;
            }
            if let Some(size) = size {
                config.demo_size = size;
            }
            config.save(&tally_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!(
                "Queries now run over {} generated accounts (seed {}). Try 'tally total'.",
                config.demo_size, config.demo_seed
            );
            Ok(())
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            config.save(&tally_dir)?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!(
                    "Demo mode is {} ({} accounts, seed {})",
                    "ON".green(),
                    config.demo_size,
                    config.demo_seed
                );
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}
