//! Domain models for Tally

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::categorize::Categorizer;
use crate::error::{Error, Result};

/// Strict date format used by the ledger file and CLI arguments
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter label meaning "no category restriction"
pub const ALL_CATEGORIES: &str = "All";

/// A recorded spending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Always >= 0, currency-agnostic
    pub amount: f64,
    pub category: String,
}

impl Transaction {
    /// Calendar month this transaction falls in
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// A transaction proposed by the user, before it joins the ledger
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    /// Auto-assigned from the description when missing or blank
    pub category: Option<String>,
}

impl NewTransaction {
    /// Resolve the category and produce a ledger transaction
    pub fn into_transaction(self, categorizer: &Categorizer) -> Transaction {
        let category = match self.category {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => categorizer.categorize(&self.description).to_string(),
        };

        Transaction {
            date: self.date,
            description: self.description,
            amount: self.amount,
            category,
        }
    }
}

/// A `(year, month)` pair, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns None when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The preceding calendar month (January rolls back to December)
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("Invalid month (use YYYY-MM): {}", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Category selection from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Category(label) => tx.category == *label,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(label) => label,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_CATEGORIES {
            Ok(Self::All)
        } else {
            Ok(Self::Category(s.to_string()))
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ========== Load Models ==========

/// Why a persisted row was left out of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidDate,
    InvalidAmount,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDate => "invalid_date",
            Self::InvalidAmount => "invalid_amount",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row dropped during load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line in the source file (header is line 1)
    pub line: u64,
    pub reason: SkipReason,
    /// The offending raw value
    pub value: String,
}

// ========== Report Models ==========

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    /// Share of the grand total, rounded to 2 decimals
    pub percentage: f64,
    pub transaction_count: i64,
}

/// Category summary report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total: f64,
    /// Ordered by category label
    pub categories: Vec<CategorySpending>,
}

impl CategorySummary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&CategorySpending> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// A single month in a monthly series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub amount: f64,
    pub transaction_count: i64,
}

/// Spending per month, chronological
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub data: Vec<MonthlyTotal>,
}
