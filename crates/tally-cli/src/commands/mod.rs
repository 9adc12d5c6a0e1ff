//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, open_session) and init
//! - `reports` - Summary, top categories, trends, insight and dashboard
//! - `transactions` - Transaction list, add and categorize

pub mod core;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use self::core::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
