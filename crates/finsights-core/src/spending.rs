//! Spending aggregation
//!
//! Turns a customer's raw transaction list into per-category and per-month
//! spend totals plus a grand total. Pure and recomputed on every call.

use crate::categorize::{categorize, Category};
use crate::models::{CategorySpend, MonthlySpend, RecentTransaction, SpendingData, Transaction};

/// How many transactions the dashboard shows as "recent"
const RECENT_LIMIT: usize = 5;

/// Resolve the category label for a transaction: an explicit non-empty
/// merchant category wins; otherwise the keyword table decides.
fn resolve_category(tx: &Transaction) -> String {
    match tx.merchant.category.as_deref() {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => categorize(&tx.description, &tx.merchant.name).as_str().to_string(),
    }
}

/// Aggregate raw transactions into spending analytics.
///
/// Only outflows (negative amounts) count toward spend; inflows are ignored
/// without error. Category and month buckets emit in insertion order of
/// first occurrence; callers must not depend on ordering, only on sums.
/// The grand total always equals the sum of either breakdown.
pub fn aggregate(transactions: &[Transaction]) -> SpendingData {
    let mut categories: Vec<CategorySpend> = Vec::new();
    let mut months: Vec<MonthlySpend> = Vec::new();
    let mut total = 0.0;

    for tx in transactions {
        if tx.amount >= 0.0 {
            continue;
        }
        let amount = tx.amount.abs();
        total += amount;

        let category = resolve_category(tx);
        match categories.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.amount += amount,
            None => categories.push(CategorySpend {
                color: Category::color_for(&category).to_string(),
                category,
                amount,
            }),
        }

        let month = tx.transaction_date.format("%b").to_string();
        match months.iter_mut().find(|m| m.month == month) {
            Some(entry) => entry.amount += amount,
            None => months.push(MonthlySpend { month, amount }),
        }
    }

    let recent = recent_transactions(transactions);

    SpendingData {
        monthly_spending: months,
        category_spending: categories,
        recent_transactions: recent,
        total_monthly_spend: total,
    }
}

/// Most recent outflows, newest first, condensed for display
fn recent_transactions(transactions: &[Transaction]) -> Vec<RecentTransaction> {
    let mut outflows: Vec<&Transaction> =
        transactions.iter().filter(|tx| tx.amount < 0.0).collect();
    outflows.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));

    outflows
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|tx| RecentTransaction {
            id: tx.id.clone(),
            description: tx.description.clone(),
            amount: tx.amount,
            date: tx.transaction_date,
            category: resolve_category(tx),
            merchant: tx.merchant.name.clone(),
        })
        .collect()
}
