//! Insight Engine - comparative spending insights
//!
//! Insights are pure computations over an immutable ledger snapshot. They do
//! no I/O and never modify the ledger.
//!
//! ## Usage
//!
//! ```rust
//! use tally_core::insights::{month_over_month, InsightKind};
//! use tally_core::Ledger;
//!
//! let result = month_over_month(&Ledger::new(), "Food", None);
//! assert_eq!(result.kind, InsightKind::NoActivity);
//! println!("{}", result.message("₹"));
//! ```

pub mod month_over_month;
pub mod types;

pub use month_over_month::month_over_month;
pub use types::{InsightKind, InsightResult};
