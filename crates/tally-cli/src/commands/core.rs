//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve config with CLI overrides
//! - `open_session` - Shared utility to load the ledger
//! - `cmd_init` - Create an empty ledger file

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{LedgerStore, Session, TallyConfig};

/// Load config, applying `--ledger` on top
pub fn load_config(config_path: Option<&Path>, ledger: Option<&Path>) -> Result<TallyConfig> {
    let mut config = TallyConfig::load(config_path).context("Failed to load config")?;
    if let Some(path) = ledger {
        config.ledger_path = path.to_path_buf();
    }
    Ok(config)
}

/// Open the configured ledger, reporting any rows dropped during load
pub fn open_session(config: &TallyConfig) -> Result<Session> {
    let store = LedgerStore::new(&config.ledger_path);
    if !store.exists() {
        anyhow::bail!(
            "Ledger not found at {}. Create it with: tally init",
            config.ledger_path.display()
        );
    }

    let session = Session::open(store, config.categorizer()).with_context(|| {
        format!("Failed to load ledger {}", config.ledger_path.display())
    })?;

    if !session.skipped().is_empty() {
        eprintln!(
            "⚠️  Skipped {} row(s) with an invalid date or amount",
            session.skipped().len()
        );
    }

    Ok(session)
}

/// Parse a YYYY-MM-DD argument
pub fn parse_date_arg(s: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), tally_core::models::DATE_FORMAT)
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD): {}", flag, s))
}

pub fn cmd_init(config: &TallyConfig) -> Result<()> {
    let store = LedgerStore::new(&config.ledger_path);

    if store.init().context("Failed to create ledger")? {
        println!("✅ Created ledger at {}", config.ledger_path.display());
        println!();
        println!("Next steps:");
        println!("  1. Add a transaction: tally add -d \"Swiggy dinner\" -a 450");
        println!("  2. See where it goes: tally dashboard");
    } else {
        println!(
            "Ledger already exists at {}, leaving it unchanged.",
            config.ledger_path.display()
        );
    }

    Ok(())
}
