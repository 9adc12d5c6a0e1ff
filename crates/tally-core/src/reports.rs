//! Spending reports: category breakdown, top categories and monthly trends

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::ledger::Ledger;
use crate::models::{CategorySpending, CategorySummary, MonthlySeries, MonthlyTotal, YearMonth};

/// Round to `places` decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Group spending by category with each category's share of the total
///
/// Categories are ordered by label. An empty ledger yields an empty summary
/// with a zero total; no percentage is computed in that case.
pub fn category_summary(ledger: &Ledger) -> CategorySummary {
    let mut groups: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for tx in ledger {
        let entry = groups.entry(tx.category.as_str()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let total: f64 = groups.values().map(|(amount, _)| amount).sum();
    let shares = percentage_shares(groups.values().map(|(amount, _)| *amount), total);

    let categories = groups
        .into_iter()
        .zip(shares)
        .map(|((category, (amount, count)), percentage)| CategorySpending {
            category: category.to_string(),
            amount,
            percentage,
            transaction_count: count,
        })
        .collect();

    CategorySummary { total, categories }
}

/// Percent of `total` for each amount, to 2 decimal places
///
/// Largest-remainder rounding over hundredths of a percent, so the shares
/// always add up to exactly 100.00. Remainder ties go to the earlier entry
/// (callers pass amounts in label order). All zeros when `total` is zero.
fn percentage_shares(amounts: impl Iterator<Item = f64>, total: f64) -> Vec<f64> {
    const HUNDREDTHS: f64 = 10_000.0;

    let exact: Vec<f64> = amounts
        .map(|amount| {
            if total > 0.0 {
                amount * HUNDREDTHS / total
            } else {
                0.0
            }
        })
        .collect();
    if total <= 0.0 {
        return exact;
    }

    let mut units: Vec<i64> = exact.iter().map(|e| e.floor() as i64).collect();
    let leftover = (HUNDREDTHS as i64 - units.iter().sum::<i64>()).max(0) as usize;

    let mut by_remainder: Vec<usize> = (0..exact.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(Ordering::Equal).then(a.cmp(&b))
    });
    for &i in by_remainder.iter().cycle().take(leftover) {
        units[i] += 1;
    }

    units.into_iter().map(|u| u as f64 / 100.0).collect()
}

/// Highest-spending categories, at most `n`
///
/// Sorted by amount descending; equal amounts are ordered by label so the
/// result is deterministic.
pub fn top_categories(summary: &CategorySummary, n: usize) -> Vec<CategorySpending> {
    let mut ranked = summary.categories.clone();
    ranked.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked.truncate(n);
    ranked
}

/// Total spending per calendar month, oldest first
pub fn monthly_series(ledger: &Ledger) -> MonthlySeries {
    let mut months: BTreeMap<YearMonth, (f64, i64)> = BTreeMap::new();
    for tx in ledger {
        let entry = months.entry(tx.month()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    MonthlySeries {
        data: months
            .into_iter()
            .map(|(month, (amount, transaction_count))| MonthlyTotal {
                month,
                amount,
                transaction_count,
            })
            .collect(),
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

    fn sample_ledger() -> Ledger {
        Ledger::from_transactions(vec![
            tx("2024-01-05", 300.0, "Food"),
            tx("2024-01-10", 100.0, "Transport"),
            tx("2024-02-01", 200.0, "Food"),
            tx("2024-02-14", 250.0, "Shopping"),
            tx("2023-12-31", 150.0, "Other"),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.33333, 2), 33.33);
        assert_eq!(round_to(66.666, 2), 66.67);
        assert_eq!(round_to(19.96, 1), 20.0);
    }

    #[test]
    fn test_category_summary() {
        let summary = category_summary(&sample_ledger());

        assert_eq!(summary.total, 1000.0);
        let labels: Vec<&str> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Other", "Shopping", "Transport"]);

        let food = summary.get("Food").unwrap();
        assert_eq!(food.amount, 500.0);
        assert_eq!(food.percentage, 50.0);
        assert_eq!(food.transaction_count, 2);
        assert_eq!(summary.get("Transport").unwrap().percentage, 10.0);
    }

    #[test]
    fn test_percentage_shares_largest_remainder() {
        let shares = percentage_shares([1.0, 1.0, 1.0].into_iter(), 3.0);
        assert_eq!(shares, vec![33.34, 33.33, 33.33]);

        let shares = percentage_shares([1.0, 2.0].into_iter(), 0.0);
        assert_eq!(shares, vec![0.0, 0.0]);
    }

    #[test]
    fn test_category_summary_empty_ledger() {
        let summary = category_summary(&Ledger::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn test_category_summary_all_zero_amounts() {
        let ledger = Ledger::from_transactions(vec![tx("2024-01-01", 0.0, "Other")]).unwrap();
        let summary = category_summary(&ledger);
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].percentage, 0.0);
        assert!(!summary.categories[0].percentage.is_nan());
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let ledgers = vec![
            sample_ledger(),
            Ledger::from_transactions(vec![
                tx("2024-01-01", 1.0, "A"),
                tx("2024-01-01", 1.0, "B"),
                tx("2024-01-01", 1.0, "C"),
            ])
            .unwrap(),
            Ledger::from_transactions(vec![
                tx("2024-01-01", 0.01, "A"),
                tx("2024-01-01", 9999.99, "B"),
                tx("2024-01-01", 123.456, "C"),
                tx("2024-01-01", 7.0, "D"),
                tx("2024-01-01", 7.0, "E"),
                tx("2024-01-01", 7.0, "F"),
                tx("2024-01-01", 7.0, "G"),
            ])
            .unwrap(),
            Ledger::from_transactions(vec![tx("2024-01-01", 42.0, "Solo")]).unwrap(),
            // Many tiny categories next to one large one
            Ledger::from_transactions(
                (0..30)
                    .map(|i| tx("2024-01-01", 1.0, &format!("Small{:02}", i)))
                    .chain(std::iter::once(tx("2024-01-01", 20378.0, "Big")))
                    .collect(),
            )
            .unwrap(),
        ];

        for ledger in ledgers {
            let summary = category_summary(&ledger);
            let pct: f64 = summary.categories.iter().map(|c| c.percentage).sum();
            assert!((pct - 100.0).abs() <= 0.1, "percentages summed to {}", pct);
            for c in &summary.categories {
                assert_eq!(round_to(c.percentage, 2), c.percentage);
            }

            let amounts: f64 = summary.categories.iter().map(|c| c.amount).sum();
            assert!((amounts - ledger.total()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_top_categories_order_and_limit() {
        let summary = category_summary(&sample_ledger());
        let top = top_categories(&summary, 3);

        let labels: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Shopping", "Other"]);

        assert_eq!(top_categories(&summary, 10).len(), 4);
        assert!(top_categories(&summary, 0).is_empty());
    }

    #[test]
    fn test_top_categories_ties_by_label() {
        let ledger = Ledger::from_transactions(vec![
            tx("2024-01-01", 100.0, "Zeta"),
            tx("2024-01-01", 100.0, "Alpha"),
            tx("2024-01-01", 100.0, "Mid"),
            tx("2024-01-01", 500.0, "Big"),
        ])
        .unwrap();
        let top = top_categories(&category_summary(&ledger), 5);

        let labels: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, vec!["Big", "Alpha", "Mid", "Zeta"]);
        for pair in top.windows(2) {
            assert!(pair[0].amount >= pair[1].amount);
        }
    }

    #[test]
    fn test_monthly_series_chronological() {
        let series = monthly_series(&sample_ledger());

        let months: Vec<String> = series.data.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);

        assert_eq!(series.data[0].amount, 150.0);
        assert_eq!(series.data[1].amount, 400.0);
        assert_eq!(series.data[1].transaction_count, 2);
        assert_eq!(series.data[2].amount, 450.0);
    }

    #[test]
    fn test_monthly_series_empty() {
        assert!(monthly_series(&Ledger::new()).data.is_empty());
    }
}
