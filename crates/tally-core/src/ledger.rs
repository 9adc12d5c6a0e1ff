//! The transaction ledger
//!
//! A [`Ledger`] is an append-only, insertion-ordered list of validated
//! transactions. It is a plain value: every mutating operation returns a new
//! ledger and leaves the original untouched, so callers decide when (and
//! whether) the result replaces their current state.

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Serialize;
use tracing::{debug, warn};

use crate::categorize::Categorizer;
use crate::error::{Error, Result};
use crate::models::{CategoryFilter, SkipReason, SkippedRow, Transaction, DATE_FORMAT};

/// Column names of the persisted ledger, in write order
pub const COLUMNS: [&str; 4] = ["Date", "Description", "Amount", "Category"];

/// An ordered set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

/// Result of loading raw rows into a ledger
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub ledger: Ledger,
    /// Rows dropped because of an unparsable date or amount
    pub skipped: Vec<SkippedRow>,
}

impl LoadOutcome {
    pub fn dropped(&self) -> usize {
        self.skipped.len()
    }
}

/// Positions of the required columns within a header row
struct ColumnIndex {
    date: usize,
    description: usize,
    amount: usize,
    category: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let [Some(date), Some(description), Some(amount), Some(category)] = COLUMNS.map(find)
        else {
            let missing = COLUMNS
                .into_iter()
                .filter(|name| find(*name).is_none())
                .map(|name| name.to_string())
                .collect();
            return Err(Error::Schema { missing });
        };

        Ok(Self {
            date,
            description,
            amount,
            category,
        })
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already validated transactions
    ///
    /// Fails with a validation error if any amount is negative or not finite.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self> {
        for tx in &transactions {
            validate_amount(tx.amount)?;
        }
        Ok(Self { transactions })
    }

    /// Parse raw tabular rows into a ledger
    ///
    /// `headers` must contain `Date`, `Description`, `Amount` and `Category`
    /// (any order, extra columns ignored) or the load fails with
    /// [`Error::Schema`] and no ledger is built. Rows whose date is not
    /// `YYYY-MM-DD`, or whose amount is not a non-negative number, are
    /// dropped, logged and reported in [`LoadOutcome::skipped`]. A blank
    /// category is filled in from the description.
    pub fn load<I>(
        headers: &StringRecord,
        rows: I,
        categorizer: &Categorizer,
    ) -> Result<LoadOutcome>
    where
        I: IntoIterator<Item = StringRecord>,
    {
        let cols = ColumnIndex::from_headers(headers)?;
        let mut transactions = Vec::new();
        let mut skipped = Vec::new();

        for (i, record) in rows.into_iter().enumerate() {
            // Header occupies line 1
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(i as u64 + 2);

            let raw_date = record.get(cols.date).unwrap_or("");
            let Some(date) = parse_date(raw_date) else {
                warn!(line, value = raw_date, "Dropping row with unparsable date");
                skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::InvalidDate,
                    value: raw_date.to_string(),
                });
                continue;
            };

            let raw_amount = record.get(cols.amount).unwrap_or("");
            let Some(amount) = parse_amount(raw_amount) else {
                warn!(line, value = raw_amount, "Dropping row with invalid amount");
                skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::InvalidAmount,
                    value: raw_amount.to_string(),
                });
                continue;
            };

            let description = record.get(cols.description).unwrap_or("").to_string();
            let category = match record.get(cols.category).map(str::trim) {
                Some(c) if !c.is_empty() => c.to_string(),
                _ => categorizer.categorize(&description).to_string(),
            };

            transactions.push(Transaction {
                date,
                description,
                amount,
                category,
            });
        }

        if !skipped.is_empty() {
            warn!(
                dropped = skipped.len(),
                kept = transactions.len(),
                "Some ledger rows were dropped during load"
            );
        }
        debug!("Loaded {} transactions", transactions.len());

        Ok(LoadOutcome {
            ledger: Self { transactions },
            skipped,
        })
    }

    /// Return a new ledger with `transaction` appended
    ///
    /// Rejects negative (or non-finite) amounts with [`Error::Validation`];
    /// `self` is never modified.
    pub fn append(&self, transaction: Transaction) -> Result<Self> {
        validate_amount(transaction.amount)?;

        let mut transactions = Vec::with_capacity(self.transactions.len() + 1);
        transactions.extend_from_slice(&self.transactions);
        transactions.push(transaction);
        Ok(Self { transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions matching `filter`, in ledger order
    pub fn filter(&self, filter: &CategoryFilter) -> Self {
        Self {
            transactions: self
                .transactions
                .iter()
                .filter(|tx| filter.matches(tx))
                .cloned()
                .collect(),
        }
    }

    /// Sum of all amounts
    pub fn total(&self) -> f64 {
        self.transactions.iter().map(|tx| tx.amount).sum()
    }

    /// Distinct category labels in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for tx in &self.transactions {
            if !seen.iter().any(|c| *c == tx.category) {
                seen.push(tx.category.clone());
            }
        }
        seen
    }

    /// Most recent transaction date, if any
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.transactions.iter().map(|tx| tx.date).max()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::Validation(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(Error::Validation(format!(
            "amount must be >= 0, got {}",
            amount
        )));
    }
    Ok(())
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse a non-negative, finite amount
fn parse_amount(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a >= 0.0)
}
