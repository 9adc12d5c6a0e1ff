//! Tally Core Library
//!
//! Shared functionality for the Tally spending tracker:
//! - Ledger model with strict date validation
//! - Keyword-based auto-categorization
//! - Category and monthly spending reports
//! - Month-over-month spending insights
//! - CSV persistence with atomic saves
//! - Configuration loading

pub mod categorize;
pub mod config;
pub mod error;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod session;
pub mod store;

pub use categorize::{categorize, CategoryRule, Categorizer, FALLBACK_CATEGORY};
pub use config::TallyConfig;
pub use error::{Error, Result};
pub use insights::{month_over_month, InsightKind, InsightResult};
pub use ledger::{Ledger, LoadOutcome};
pub use models::{
    CategoryFilter, CategorySpending, CategorySummary, MonthlySeries, MonthlyTotal,
    NewTransaction, SkipReason, SkippedRow, Transaction, YearMonth,
};
pub use reports::{category_summary, monthly_series, top_categories};
pub use session::Session;
pub use store::LedgerStore;
