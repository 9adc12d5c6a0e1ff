//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tally_core::CategoryFilter;

/// Tally - Track where your money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal spending tracker with category insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger CSV path (overrides `ledger_path` from the config)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Config file path
    ///
    /// Defaults to ~/.config/tally/config.toml when present, otherwise the
    /// built-in defaults are used.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty ledger file
    Init,

    /// Spending by category with share of total
    Summary,

    /// Highest-spending categories
    Top {
        /// Number of categories (defaults to `top_n` from the config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Monthly spending trend
    Trends {
        /// Category to chart, or "All"
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,
    },

    /// List transactions
    Transactions {
        /// Category to show, or "All"
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,

        /// Show only the most recent N transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Month-over-month insight for a category
    Insight {
        /// Category label (e.g. "Food")
        category: String,

        /// Reference date (YYYY-MM-DD); defaults to the latest date in the ledger
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Add a transaction and save the ledger
    Add {
        /// What the money was spent on
        #[arg(short, long, default_value = "")]
        description: String,

        /// Amount spent (must not be negative)
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,

        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Category; auto-assigned from the description when omitted
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show which category a description would be assigned
    Categorize {
        /// Description text
        description: String,
    },

    /// Summary, top categories, trend, transactions and insight in one view
    Dashboard {
        /// Category filter, or "All"
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,
    },
}
