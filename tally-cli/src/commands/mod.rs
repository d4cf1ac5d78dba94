//! CLI command implementations

pub mod demo;
pub mod frequency;
pub mod groups;
pub mod listing;
pub mod lookup;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use tally_core::config::Config;
use tally_core::TallyContext;

use crate::output;
use crate::SourceArgs;

/// Get the tally directory from environment or default
pub fn get_tally_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TALLY_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".tally"))
        .context("Could not find home directory")
}

/// Build the tally context, letting command-line flags override settings
pub fn get_context(source: &SourceArgs) -> Result<TallyContext> {
    let tally_dir = get_tally_dir()?;
    let mut config = Config::load(&tally_dir)
        .with_context(|| format!("Failed to read settings from {:?}", tally_dir))?;

    if let Some(data) = &source.data {
        config.data_file = Some(data.clone());
        config.demo_mode = false;
    }
    if source.demo {
        config.demo_mode = true;
    }
    debug!("resolved config: {:?}", config);

    TallyContext::from_config(config).context("Failed to initialize tally context")
}

/// Print a query result as a JSON envelope or through `render`.
///
/// Query errors are echoed as a failed envelope in JSON mode and then
/// returned so the process exits non-zero.
pub fn report<T, F>(result: tally_core::domain::result::Result<T>, json: bool, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(T) -> Result<()>,
{
    match result {
        Ok(data) if json => output::print_json(data),
        Ok(data) => render(data),
        Err(e) => {
            if json {
                output::print_json_error(&e.to_string())?;
            }
            Err(e.into())
        }
    }
}
