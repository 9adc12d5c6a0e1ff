//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::YearMonth;

/// Outcome of a month-over-month comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Nothing spent in either month
    NoActivity,
    /// Spending this month, nothing the month before
    NewSpending,
    Increase,
    Decrease,
    Unchanged,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::NoActivity => "no_activity",
            InsightKind::NewSpending => "new_spending",
            InsightKind::Increase => "increase",
            InsightKind::Decrease => "decrease",
            InsightKind::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_activity" => Ok(InsightKind::NoActivity),
            "new_spending" => Ok(InsightKind::NewSpending),
            "increase" => Ok(InsightKind::Increase),
            "decrease" => Ok(InsightKind::Decrease),
            "unchanged" => Ok(InsightKind::Unchanged),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Month-over-month spending comparison for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    pub category: String,
    pub kind: InsightKind,
    /// `NewSpending`: the current month's total.
    /// `Increase`/`Decrease`: absolute percent change, 1 decimal.
    /// Otherwise None.
    pub value: Option<f64>,
    /// None when there was no reference date (empty ledger, no `--as-of`)
    pub current_month: Option<YearMonth>,
    pub current_amount: f64,
    pub previous_amount: f64,
}

impl InsightResult {
    /// Human-readable insight, amounts prefixed with `currency`
    pub fn message(&self, currency: &str) -> String {
        let category = &self.category;
        let value = self.value.unwrap_or_default();
        match self.kind {
            InsightKind::NoActivity => {
                format!("No spending in {} for the past two months.", category)
            }
            InsightKind::NewSpending => format!(
                "New spending in {}: {}{:.2} this month.",
                category, currency, value
            ),
            InsightKind::Increase => format!(
                "You increased your {} spending by {:.1}% compared to last month.",
                category, value
            ),
            InsightKind::Decrease => format!(
                "You decreased your {} spending by {:.1}% compared to last month.",
                category, value
            ),
            InsightKind::Unchanged => {
                format!("Your {} spending is unchanged from last month.", category)
            }
        }
    }
}
