//! Configuration management
//!
//! Settings live in `<tally_dir>/settings.json`:
//! ```json
//! {
//!   "app": { "demoMode": false, "dataFile": "/path/to/accounts.json", ... },
//!   "demo": { "seed": 42, "size": 50 }
//! }
//! ```
//! Fields this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::adapters::demo::{DEFAULT_DEMO_SEED, DEFAULT_DEMO_SIZE};
use crate::domain::result::Result;

pub const SETTINGS_FILE: &str = "settings.json";
pub const ENV_DEMO_MODE: &str = "TALLY_DEMO_MODE";
pub const ENV_DATA_FILE: &str = "TALLY_DATA_FILE";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    demo: DemoSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DemoSettings {
    #[serde(default = "default_demo_seed")]
    seed: u64,
    #[serde(default = "default_demo_size")]
    size: usize,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_DEMO_SEED,
            size: DEFAULT_DEMO_SIZE,
        }
    }
}

fn default_demo_seed() -> u64 {
    DEFAULT_DEMO_SEED
}

fn default_demo_size() -> usize {
    DEFAULT_DEMO_SIZE
}

/// Tally configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    /// JSON or CSV snapshot to analyse when not in demo mode
    pub data_file: Option<PathBuf>,
    pub demo_seed: u64,
    pub demo_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            data_file: None,
            demo_seed: DEFAULT_DEMO_SEED,
            demo_size: DEFAULT_DEMO_SIZE,
        }
    }
}

impl Config {
    /// Load config from the tally directory
    ///
    /// Environment variables override the file:
    /// - `TALLY_DEMO_MODE` (true/1/yes or false/0/no)
    /// - `TALLY_DATA_FILE`
    pub fn load(tally_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(tally_dir)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from settings.json only, ignoring the environment
    pub fn load_file(tally_dir: &Path) -> Result<Self> {
        let raw = read_settings(tally_dir)?;
        Ok(Self {
            demo_mode: raw.app.demo_mode,
            data_file: raw.app.data_file,
            demo_seed: raw.demo.seed,
            demo_size: raw.demo.size,
        })
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        match lookup(ENV_DEMO_MODE).as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => self.demo_mode = true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => self.demo_mode = false,
            Some(other) => warn!("ignoring {}={:?}", ENV_DEMO_MODE, other),
            None => {}
        }

        if let Some(path) = lookup(ENV_DATA_FILE).filter(|p| !p.trim().is_empty()) {
            self.data_file = Some(PathBuf::from(path));
        }
    }

    /// Save config to the tally directory
    /// Preserves other settings that tally doesn't manage
    pub fn save(&self, tally_dir: &Path) -> Result<()> {
        let mut settings = read_settings(tally_dir)?;

        settings.app.demo_mode = self.demo_mode;
        settings.app.data_file = self.data_file.clone();
        settings.demo.seed = self.demo_seed;
        settings.demo.size = self.demo_size;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(tally_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

fn read_settings(tally_dir: &Path) -> Result<SettingsFile> {
    let settings_path = tally_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("unreadable {:?}, using defaults: {}", settings_path, e);
        SettingsFile::default()
    }))
}
