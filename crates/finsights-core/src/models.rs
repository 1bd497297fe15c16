//! Data models for the FinSights backend
//!
//! Field names mirror the Nessie sandbox API wire format (`_id`,
//! `first_name`, ...) so records deserialize straight off the upstream
//! responses and serialize unchanged to API clients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A customer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    /// Login name for the demo fixtures; empty for Nessie customers
    #[serde(default)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub created_date: Option<NaiveDate>,
}

/// Customer mailing address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street_number: String,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

/// A bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub rewards: i64,
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub customer_id: String,
}

/// Merchant attached to a transaction. The category is optional; when the
/// upstream omits it the categorizer infers one from keywords.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A raw transaction record. Negative amounts are outflows (spending);
/// records are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub transaction_type: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub merchant: Merchant,
}

/// Spending summed for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpend {
    pub month: String,
    pub amount: f64,
}

/// Spending summed for one category, with its display color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    pub color: String,
}

/// A transaction condensed for dashboard display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub merchant: String,
}

/// Derived spending analytics, recomputed from raw transactions on every
/// aggregation call and never cached across requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpendingData {
    pub monthly_spending: Vec<MonthlySpend>,
    pub category_spending: Vec<CategorySpend>,
    pub recent_transactions: Vec<RecentTransaction>,
    pub total_monthly_spend: f64,
}

impl SpendingData {
    /// Spend for a named category, zero when absent
    pub fn category_amount(&self, category: &str) -> f64 {
        self.category_spending
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
            .unwrap_or(0.0)
    }
}

/// Everything one customer's dashboard needs for a single request.
/// Request-scoped; no cross-request shared mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub customer: Customer,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub spending_data: SpendingData,
}

/// A human-readable spending insight. Presentation artifact generated fresh
/// per request; list ordering is significant and stable for equal inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingInsight {
    pub title: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub tip: String,
}

/// Caller-supplied budget ceilings per category, keyed as the budget page
/// submits them. Zero or missing means "no budget set" for that category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetMap {
    pub transportation: f64,
    #[serde(rename = "foodDining")]
    pub food_dining: f64,
    pub healthcare: f64,
    pub entertainment: f64,
    pub shopping: f64,
}

impl BudgetMap {
    /// Sum of all supplied ceilings
    pub fn total(&self) -> f64 {
        self.transportation + self.food_dining + self.healthcare + self.entertainment
            + self.shopping
    }
}

/// One prior turn of an assistant conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_map_deserializes_camel_case() {
        let budget: BudgetMap =
            serde_json::from_str(r#"{"foodDining": 1000, "transportation": 500}"#).unwrap();
        assert_eq!(budget.food_dining, 1000.0);
        assert_eq!(budget.transportation, 500.0);
        assert_eq!(budget.healthcare, 0.0);
        assert_eq!(budget.total(), 1500.0);
    }

    #[test]
    fn test_transaction_wire_format() {
        let json = r#"{
            "_id": "txn1",
            "type": "debit",
            "amount": -45.5,
            "description": "Starbucks Coffee",
            "transaction_date": "2026-08-22",
            "status": "completed",
            "account_id": "acc1",
            "merchant": {"_id": "m1", "name": "Starbucks", "category": "Food & Dining"}
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, "txn1");
        assert_eq!(tx.amount, -45.5);
        assert_eq!(tx.merchant.category.as_deref(), Some("Food & Dining"));

        let back = serde_json::to_value(&tx).unwrap();
        assert_eq!(back["_id"], "txn1");
        assert_eq!(back["type"], "debit");
    }

    #[test]
    fn test_merchant_category_optional() {
        let m: Merchant = serde_json::from_str(r#"{"_id": "m2", "name": "Shell"}"#).unwrap();
        assert!(m.category.is_none());
    }
}
