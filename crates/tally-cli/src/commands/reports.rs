//! Report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use tally_core::{
    category_summary, month_over_month, monthly_series, top_categories, CategoryFilter,
    CategorySpending, CategorySummary, InsightResult, Ledger, MonthlySeries, TallyConfig,
};

use super::{print_json, print_transactions, truncate};

pub fn cmd_summary(ledger: &Ledger, currency: &str, json: bool) -> Result<()> {
    let summary = category_summary(ledger);
    if json {
        return print_json(&summary);
    }
    print_summary(&summary, currency);
    Ok(())
}

pub fn cmd_top(ledger: &Ledger, limit: usize, currency: &str, json: bool) -> Result<()> {
    let top = top_categories(&category_summary(ledger), limit);
    if json {
        return print_json(&top);
    }
    print_top(&top, limit, currency);
    Ok(())
}

pub fn cmd_trends(
    ledger: &Ledger,
    filter: &CategoryFilter,
    currency: &str,
    json: bool,
) -> Result<()> {
    let series = monthly_series(&ledger.filter(filter));
    if json {
        return print_json(&json!({ "category": filter.label(), "data": series.data }));
    }
    print_trends(&series, filter, currency);
    Ok(())
}

pub fn cmd_insight(
    ledger: &Ledger,
    category: &str,
    as_of: Option<NaiveDate>,
    currency: &str,
    json: bool,
) -> Result<()> {
    let insight = month_over_month(ledger, category, as_of);
    if json {
        return print_json(&json!({
            "insight": insight,
            "message": insight.message(currency),
        }));
    }
    print_insight(&insight, currency);
    Ok(())
}

/// Everything on one page: the overall picture, then the selected category
pub fn cmd_dashboard(
    ledger: &Ledger,
    filter: &CategoryFilter,
    config: &TallyConfig,
    json: bool,
) -> Result<()> {
    let currency = config.currency_symbol.as_str();
    let summary = category_summary(ledger);
    let top = top_categories(&summary, config.top_n);
    let series = monthly_series(ledger);
    let filtered = ledger.filter(filter);
    let insight = match filter {
        CategoryFilter::All => None,
        CategoryFilter::Category(label) => Some(month_over_month(ledger, label, None)),
    };

    if json {
        return print_json(&json!({
            "summary": summary,
            "top_categories": top,
            "monthly": series.data,
            "filter": filter.label(),
            "transactions": filtered,
            "total_spending": filtered.total(),
            "insight": insight.as_ref().map(|i| json!({
                "insight": i,
                "message": i.message(currency),
            })),
        }));
    }

    print_summary(&summary, currency);
    print_top(&top, config.top_n, currency);
    print_trends(&series, &CategoryFilter::All, currency);

    let mut categories = vec![tally_core::models::ALL_CATEGORIES.to_string()];
    categories.extend(ledger.categories());
    println!();
    println!("   Categories: {}", categories.join(", "));

    print_transactions(&filtered, filter, currency);
    if let Some(insight) = insight {
        print_insight(&insight, currency);
    }
    Ok(())
}

fn print_summary(summary: &CategorySummary, currency: &str) {
    println!();
    println!("📊 Category Summary");
    println!("   ─────────────────────────────────────────────────────────────");

    if summary.is_empty() {
        println!("   No spending recorded yet.");
        return;
    }

    println!("   Total: {}{:.2}", currency, summary.total);
    println!();
    println!(
        "   {:25} │ {:>12} │ {:>7} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼──────────────┼─────────┼───────");
    for cat in &summary.categories {
        print_category_row(cat);
    }
}

fn print_category_row(cat: &CategorySpending) {
    println!(
        "   {:25} │ {:>12.2} │ {:>6.2}% │ {:>5}",
        truncate(&cat.category, 25),
        cat.amount,
        cat.percentage,
        cat.transaction_count
    );
}

fn print_top(top: &[CategorySpending], limit: usize, currency: &str) {
    println!();
    println!("🏆 Top {} Spending Categories", limit);
    println!("   ─────────────────────────────────────────────────────────────");

    if top.is_empty() {
        println!("   No spending recorded yet.");
        return;
    }

    let max = top.first().map(|c| c.amount).unwrap_or(0.0);
    for (i, cat) in top.iter().enumerate() {
        println!(
            "   {}. {:20} {}{:>12.2}  {}",
            i + 1,
            truncate(&cat.category, 20),
            currency,
            cat.amount,
            bar(cat.amount, max, 20)
        );
    }
}

fn print_trends(series: &MonthlySeries, filter: &CategoryFilter, currency: &str) {
    println!();
    println!("📈 Monthly Spending Trend");
    if let CategoryFilter::Category(label) = filter {
        println!("   Category: {}", label);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if series.data.is_empty() {
        println!("   No spending data found.");
        return;
    }

    let max = series
        .data
        .iter()
        .map(|p| p.amount)
        .fold(0.0_f64, f64::max);

    println!("   {:8} │ {:>12} │ {:>5} │", "Month", "Amount", "Count");
    println!("   ─────────┼──────────────┼───────┼──────────────────────");
    for point in &series.data {
        println!(
            "   {:8} │ {}{:>11.2} │ {:>5} │ {}",
            point.month.to_string(),
            currency,
            point.amount,
            point.transaction_count,
            bar(point.amount, max, 20)
        );
    }
}

fn print_insight(insight: &InsightResult, currency: &str) {
    println!();
    println!("💡 {}", insight.message(currency));
    if let Some(month) = insight.current_month {
        println!(
            "   {} {}{:.2} vs {} {}{:.2}",
            month,
            currency,
            insight.current_amount,
            month.previous(),
            currency,
            insight.previous_amount
        );
    }
}

/// Horizontal bar scaled against `max`
fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}
