//! Month-over-month spending comparison
//!
//! "Current month" is anchored to the most recent date in the ledger rather
//! than the wall clock, so results are reproducible against historical data.

use chrono::NaiveDate;
use tracing::debug;

use crate::ledger::Ledger;
use crate::models::YearMonth;
use crate::reports::round_to;

use super::types::{InsightKind, InsightResult};

/// Compare a category's spending in the reference month with the month before
///
/// `reference` defaults to the latest date in the whole (unfiltered) ledger.
/// An empty ledger with no reference date yields `NoActivity`.
pub fn month_over_month(
    ledger: &Ledger,
    category: &str,
    reference: Option<NaiveDate>,
) -> InsightResult {
    let Some(reference) = reference.or_else(|| ledger.latest_date()) else {
        return InsightResult {
            category: category.to_string(),
            kind: InsightKind::NoActivity,
            value: None,
            current_month: None,
            current_amount: 0.0,
            previous_amount: 0.0,
        };
    };

    let current_month = YearMonth::from_date(reference);
    let previous_month = current_month.previous();

    let mut current = 0.0;
    let mut previous = 0.0;
    for tx in ledger.iter().filter(|tx| tx.category == category) {
        if current_month.contains(tx.date) {
            current += tx.amount;
        } else if previous_month.contains(tx.date) {
            previous += tx.amount;
        }
    }

    let (kind, value) = classify(current, previous);

    debug!(
        category,
        month = %current_month,
        current,
        previous,
        kind = %kind,
        "Computed month-over-month insight"
    );

    InsightResult {
        category: category.to_string(),
        kind,
        value,
        current_month: Some(current_month),
        current_amount: current,
        previous_amount: previous,
    }
}

/// Zero previous spend is handled before any division
fn classify(current: f64, previous: f64) -> (InsightKind, Option<f64>) {
    if previous == 0.0 {
        if current == 0.0 {
            return (InsightKind::NoActivity, None);
        }
        return (InsightKind::NewSpending, Some(current));
    }

    let change = (current - previous) / previous * 100.0;
    let kind = if change > 0.0 {
        InsightKind::Increase
    } else if change < 0.0 {
        InsightKind::Decrease
    } else {
        InsightKind::Unchanged
    };

    match kind {
        InsightKind::Unchanged => (kind, None),
        _ => (kind, Some(round_to(change.abs(), 1))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::parse_date;
    use crate::models::Transaction;

    fn tx(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            date: parse_date(date).unwrap(),
            description: String::new(),
            amount,
            category: category.to_string(),
        }
    }

    fn ledger(txs: Vec<Transaction>) -> Ledger {
        Ledger::from_transactions(txs).unwrap()
    }

    #[test]
    fn test_new_spending() {
        let ledger = ledger(vec![
            tx("2024-02-10", 500.0, "Food"),
            tx("2024-01-10", 80.0, "Transport"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.kind, InsightKind::NewSpending);
        assert_eq!(result.value, Some(500.0));
        assert_eq!(result.current_month.unwrap().to_string(), "2024-02");
    }

    #[test]
    fn test_increase() {
        let ledger = ledger(vec![
            tx("2024-01-03", 600.0, "Food"),
            tx("2024-01-20", 400.0, "Food"),
            tx("2024-02-05", 1200.0, "Food"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.kind, InsightKind::Increase);
        assert_eq!(result.value, Some(20.0));
        assert_eq!(result.previous_amount, 1000.0);
        assert_eq!(result.current_amount, 1200.0);
    }

    #[test]
    fn test_decrease_rounds_to_one_decimal() {
        let ledger = ledger(vec![
            tx("2024-01-03", 300.0, "Food"),
            tx("2024-02-05", 200.0, "Food"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.kind, InsightKind::Decrease);
        assert_eq!(result.value, Some(33.3));
    }

    #[test]
    fn test_dropped_to_zero_is_full_decrease() {
        let ledger = ledger(vec![
            tx("2024-01-03", 300.0, "Food"),
            tx("2024-02-05", 50.0, "Transport"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.kind, InsightKind::Decrease);
        assert_eq!(result.value, Some(100.0));
    }

    #[test]
    fn test_unchanged() {
        let ledger = ledger(vec![
            tx("2024-01-03", 250.0, "Food"),
            tx("2024-02-05", 250.0, "Food"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.kind, InsightKind::Unchanged);
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_no_activity() {
        let ledger = ledger(vec![
            tx("2023-06-03", 250.0, "Food"),
            tx("2024-02-05", 90.0, "Transport"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.kind, InsightKind::NoActivity);
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_unknown_category_is_no_activity() {
        let ledger = ledger(vec![tx("2024-02-05", 90.0, "Transport")]);
        let result = month_over_month(&ledger, "Gifts", None);
        assert_eq!(result.kind, InsightKind::NoActivity);
    }

    #[test]
    fn test_empty_ledger() {
        let result = month_over_month(&Ledger::new(), "Food", None);
        assert_eq!(result.kind, InsightKind::NoActivity);
        assert_eq!(result.current_amount, 0.0);
        assert_eq!(result.current_month, None);
    }

    #[test]
    fn test_anchor_uses_whole_ledger_not_category() {
        // Latest Food spend is January, but the ledger's latest date is March,
        // so current = March (0) and previous = February (0).
        let ledger = ledger(vec![
            tx("2024-01-15", 400.0, "Food"),
            tx("2024-03-02", 10.0, "Transport"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.current_month.unwrap().to_string(), "2024-03");
        assert_eq!(result.kind, InsightKind::NoActivity);
    }

    #[test]
    fn test_year_rollover() {
        let ledger = ledger(vec![
            tx("2023-12-10", 200.0, "Food"),
            tx("2024-01-04", 300.0, "Food"),
        ]);
        let result = month_over_month(&ledger, "Food", None);

        assert_eq!(result.current_month.unwrap().to_string(), "2024-01");
        assert_eq!(result.previous_amount, 200.0);
        assert_eq!(result.kind, InsightKind::Increase);
        assert_eq!(result.value, Some(50.0));
    }

    #[test]
    fn test_explicit_reference_date() {
        let ledger = ledger(vec![
            tx("2024-01-04", 100.0, "Food"),
            tx("2024-02-04", 150.0, "Food"),
            tx("2024-05-04", 999.0, "Food"),
        ]);
        let result = month_over_month(&ledger, "Food", parse_date("2024-02-28"));

        assert_eq!(result.current_month.unwrap().to_string(), "2024-02");
        assert_eq!(result.kind, InsightKind::Increase);
        assert_eq!(result.value, Some(50.0));
    }

    #[test]
    fn test_does_not_mutate_ledger() {
        let ledger = ledger(vec![tx("2024-02-04", 150.0, "Food")]);
        let before = ledger.clone();
        let _ = month_over_month(&ledger, "Food", None);
        assert_eq!(ledger, before);
    }
}
