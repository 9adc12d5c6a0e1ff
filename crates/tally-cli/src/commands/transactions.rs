//! Transaction command implementations

use anyhow::{Context, Result};
use serde_json::json;
use tally_core::{CategoryFilter, Categorizer, Ledger, NewTransaction, Session};

use super::{parse_date_arg, print_json, truncate};

pub fn cmd_transactions_list(
    ledger: &Ledger,
    filter: &CategoryFilter,
    limit: Option<usize>,
    currency: &str,
    json: bool,
) -> Result<()> {
    let filtered = ledger.filter(filter);
    let shown = match limit {
        Some(n) if n < filtered.len() => &filtered.transactions()[filtered.len() - n..],
        _ => filtered.transactions(),
    };

    if json {
        return print_json(&json!({
            "category": filter.label(),
            "transactions": shown,
            "total_spending": filtered.total(),
        }));
    }

    if ledger.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  tally add -d \"Swiggy dinner\" -a 450");
        return Ok(());
    }

    print_transaction_rows(shown, filter);
    if shown.len() < filtered.len() {
        println!(
            "   ... showing last {} of {} transactions",
            shown.len(),
            filtered.len()
        );
    }
    print_total(&filtered, currency);
    Ok(())
}

/// Filtered transaction table followed by the total for that selection
pub fn print_transactions(ledger: &Ledger, filter: &CategoryFilter, currency: &str) {
    print_transaction_rows(ledger.transactions(), filter);
    print_total(ledger, currency);
}

fn print_transaction_rows(transactions: &[tally_core::Transaction], filter: &CategoryFilter) {
    println!();
    println!("📝 Transactions ({})", filter.label());
    println!("   ─────────────────────────────────────────────────────────────");

    if transactions.is_empty() {
        println!("   No transactions in this category.");
        return;
    }

    for tx in transactions {
        println!(
            "   {} │ {:>10.2} │ {:12} │ {}",
            tx.date,
            tx.amount,
            truncate(&tx.category, 12),
            truncate(&tx.description, 40)
        );
    }
}

fn print_total(ledger: &Ledger, currency: &str) {
    println!();
    println!("   Total Spending: {}{:.2}", currency, ledger.total());
}

pub fn cmd_add(
    session: &mut Session,
    description: &str,
    amount: f64,
    date: Option<&str>,
    category: Option<&str>,
    currency: &str,
    json: bool,
) -> Result<()> {
    let date = match date {
        Some(s) => parse_date_arg(s, "--date")?,
        None => chrono::Local::now().date_naive(),
    };

    let new = NewTransaction {
        date,
        description: description.to_string(),
        amount,
        category: category.map(str::to_string),
    };

    let added = session
        .append(new)
        .context("Failed to add transaction")?
        .clone();

    if json {
        return print_json(&added);
    }

    println!("✅ Transaction added and saved!");
    println!("   Date:        {}", added.date);
    println!("   Description: {}", added.description);
    println!("   Amount:      {}{:.2}", currency, added.amount);
    println!("   Category:    {}", added.category);
    Ok(())
}

pub fn cmd_categorize(categorizer: &Categorizer, description: &str, json: bool) -> Result<()> {
    let category = categorizer.categorize(description);

    if json {
        return print_json(&json!({
            "description": description,
            "category": category,
        }));
    }

    println!("{} → {}", description, category);
    Ok(())
}
