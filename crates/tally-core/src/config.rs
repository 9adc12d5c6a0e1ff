//! Configuration for Tally
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. An explicit path (e.g. `--config`), which must exist
//! 2. An override in the config dir (~/.config/tally/config.toml on Linux)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::categorize::{CategoryRule, Categorizer};
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct TallyConfig {
    pub ledger_path: PathBuf,
    pub currency_symbol: String,
    pub top_n: usize,
    /// Appended after the built-in categorization rules
    pub rules: Vec<CategoryRule>,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("transactions.csv"),
            currency_symbol: "₹".to_string(),
            top_n: 5,
            rules: Vec::new(),
        }
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    ledger_path: Option<PathBuf>,
    currency_symbol: Option<String>,
    top_n: Option<usize>,
    #[serde(default)]
    rules: Vec<CategoryRule>,
}

impl TallyConfig {
    /// Load config (explicit path, then user override, then embedded default)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        debug!("Using embedded default config");
        Self::parse(DEFAULT_CONFIG)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::parse(&content)
    }

    /// Parse config from TOML content; missing keys keep their defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();
        if let Some(path) = raw.ledger_path {
            config.ledger_path = path;
        }
        if let Some(symbol) = raw.currency_symbol {
            config.currency_symbol = symbol;
        }
        if let Some(n) = raw.top_n {
            if n == 0 {
                return Err(Error::Config("top_n must be at least 1".into()));
            }
            config.top_n = n;
        }
        for rule in &raw.rules {
            if rule.label.trim().is_empty() {
                return Err(Error::Config("rule label must not be empty".into()));
            }
        }
        config.rules = raw.rules;

        Ok(config)
    }

    /// Categorizer with the built-in table plus configured rules
    pub fn categorizer(&self) -> Categorizer {
        Categorizer::with_extra_rules(self.rules.iter().cloned())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tally").join("config.toml"))
}
