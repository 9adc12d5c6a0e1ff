//! Tally CLI - Personal spending tracker
//!
//! Usage:
//!   tally init                          Create an empty ledger
//!   tally add -d "Swiggy" -a 450        Add a transaction (auto-categorized)
//!   tally summary                       Spending by category
//!   tally insight Food                  Month-over-month insight

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.ledger.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Init => commands::cmd_init(&config),
        Commands::Categorize { description } => {
            commands::cmd_categorize(&config.categorizer(), &description, json)
        }
        Commands::Add {
            description,
            amount,
            date,
            category,
        } => {
            let mut session = commands::open_session(&config)?;
            commands::cmd_add(
                &mut session,
                &description,
                amount,
                date.as_deref(),
                category.as_deref(),
                &config.currency_symbol,
                json,
            )
        }
        Commands::Summary => {
            let session = commands::open_session(&config)?;
            commands::cmd_summary(session.ledger(), &config.currency_symbol, json)
        }
        Commands::Top { limit } => {
            let session = commands::open_session(&config)?;
            commands::cmd_top(
                session.ledger(),
                limit.unwrap_or(config.top_n),
                &config.currency_symbol,
                json,
            )
        }
        Commands::Trends { category } => {
            let session = commands::open_session(&config)?;
            commands::cmd_trends(session.ledger(), &category, &config.currency_symbol, json)
        }
        Commands::Transactions { category, limit } => {
            let session = commands::open_session(&config)?;
            commands::cmd_transactions_list(
                session.ledger(),
                &category,
                limit,
                &config.currency_symbol,
                json,
            )
        }
        Commands::Insight { category, as_of } => {
            let session = commands::open_session(&config)?;
            let as_of = as_of
                .as_deref()
                .map(|s| commands::parse_date_arg(s, "--as-of"))
                .transpose()?;
            commands::cmd_insight(
                session.ledger(),
                &category,
                as_of,
                &config.currency_symbol,
                json,
            )
        }
        Commands::Dashboard { category } => {
            let session = commands::open_session(&config)?;
            commands::cmd_dashboard(session.ledger(), &category, &config, json)
        }
    }
}
