//! In-memory demo fixtures
//!
//! Four demo customers with realistic accounts and transactions. The whole
//! data set is constructed once and never mutated, so concurrent request
//! handlers can read it without synchronization. Spending analytics are
//! always derived from the raw transactions, never stored here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{Account, Address, Customer, Merchant, Transaction};

use super::BankDataProvider;

/// One fixture customer with credentials and backing records
struct CustomerRecord {
    customer: Customer,
    password: &'static str,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

/// Static in-memory data provider for the demo customers
#[derive(Clone)]
pub struct MockProvider {
    records: Arc<Vec<CustomerRecord>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            records: Arc::new(vec![
                sarah(today),
                michael(today),
                robert(today),
                emma(today),
            ]),
        }
    }

    /// Demo usernames, for startup logging
    pub fn usernames(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.customer.username.as_str())
            .collect()
    }

    /// Look up a record by customer id or username
    fn record(&self, key: &str) -> Result<&CustomerRecord> {
        self.records
            .iter()
            .find(|r| r.customer.id == key || r.customer.username == key)
            .ok_or_else(|| Error::NotFound(format!("customer not found: {}", key)))
    }
}

#[async_trait]
impl BankDataProvider for MockProvider {
    async fn customer(&self, customer_id: &str) -> Result<Customer> {
        Ok(self.record(customer_id)?.customer.clone())
    }

    async fn accounts(&self, customer_id: &str) -> Result<Vec<Account>> {
        Ok(self.record(customer_id)?.accounts.clone())
    }

    async fn transactions(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        Ok(self.record(customer_id)?.transactions.clone())
    }

    async fn login(&self, username: &str, password: &str) -> Result<Customer> {
        let record = self
            .records
            .iter()
            .find(|r| r.customer.username == username)
            .ok_or_else(|| Error::Auth("invalid credentials".into()))?;
        if record.password != password {
            return Err(Error::Auth("invalid credentials".into()));
        }
        Ok(record.customer.clone())
    }
}

fn account(
    id: &str,
    account_type: &str,
    nickname: &str,
    rewards: i64,
    balance: i64,
    number: &str,
    customer_id: &str,
) -> Account {
    Account {
        id: id.to_string(),
        account_type: account_type.to_string(),
        nickname: nickname.to_string(),
        rewards,
        balance,
        account_number: number.to_string(),
        customer_id: customer_id.to_string(),
    }
}

/// Transaction template shared by all demo customers: (amount, description,
/// days ago, merchant name, explicit category). Amounts are scaled per
/// customer so each profile spends at a different level; everything is
/// deterministic, no randomization.
const TRANSACTION_TEMPLATE: &[(f64, &str, i64, &str, Option<&str>)] = &[
    (-45.50, "Starbucks Coffee", 1, "Starbucks", Some("Food & Dining")),
    (-120.00, "Uber Rides", 2, "Uber", Some("Transportation")),
    (-89.99, "Amazon Purchase", 3, "Amazon", Some("Shopping")),
    (-15.99, "Netflix Subscription", 5, "Netflix", Some("Entertainment")),
    (-250.00, "Grocery Store", 7, "Whole Foods", Some("Food & Dining")),
    (-75.00, "Gas Station", 9, "Shell", Some("Transportation")),
    (-200.00, "Restaurant Dinner", 12, "The Cheesecake Factory", Some("Food & Dining")),
    (-45.00, "Movie Tickets", 15, "AMC Theaters", Some("Entertainment")),
    (-120.00, "Pharmacy", 18, "CVS Pharmacy", Some("Healthcare")),
    (-85.00, "Online Shopping", 21, "Target", Some("Shopping")),
    (-35.00, "Coffee Shop", 24, "Blue Bottle Coffee", Some("Food & Dining")),
    // No explicit category: exercises the keyword categorizer (-> Other).
    (-150.00, "Gym Membership", 28, "Equinox", None),
];

fn transactions(customer_key: &str, account_id: &str, scale: f64, today: NaiveDate) -> Vec<Transaction> {
    TRANSACTION_TEMPLATE
        .iter()
        .enumerate()
        .map(|(i, (amount, description, days_ago, merchant, category))| Transaction {
            id: format!("{}-txn{}", customer_key, i + 1),
            transaction_type: "debit".to_string(),
            amount: (amount * scale * 100.0).round() / 100.0,
            description: description.to_string(),
            transaction_date: today - Duration::days(*days_ago),
            status: "completed".to_string(),
            account_id: account_id.to_string(),
            merchant: Merchant {
                id: format!("merchant{}", i + 1),
                name: merchant.to_string(),
                category: category.map(|c| c.to_string()),
            },
        })
        .collect()
}

fn customer(
    id: &str,
    username: &str,
    first: &str,
    last: &str,
    street_number: &str,
    street: &str,
    city: &str,
    state: &str,
    zip: &str,
) -> Customer {
    Customer {
        id: id.to_string(),
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        address: Address {
            street_number: street_number.to_string(),
            street_name: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
        },
        created_date: None,
    }
}

// Demo Customer 1: Young Professional
fn sarah(today: NaiveDate) -> CustomerRecord {
    CustomerRecord {
        customer: customer(
            "demo1", "sarah", "Sarah", "Johnson", "123", "Main St", "San Francisco", "CA", "94102",
        ),
        password: "password123",
        accounts: vec![
            account("acc1", "Checking", "Primary Checking", 1250, 3500, "****1234", "demo1"),
            account("acc2", "Savings", "Emergency Fund", 0, 8500, "****5678", "demo1"),
        ],
        transactions: transactions("demo1", "acc1", 1.0, today),
    }
}

// Demo Customer 2: Family with Kids
fn michael(today: NaiveDate) -> CustomerRecord {
    CustomerRecord {
        customer: customer(
            "demo2", "michael", "Michael", "Chen", "456", "Oak Avenue", "Austin", "TX", "78701",
        ),
        password: "password123",
        accounts: vec![
            account("acc3", "Checking", "Family Checking", 2100, 5200, "****9012", "demo2"),
            account("acc4", "Savings", "Kids College Fund", 0, 15000, "****3456", "demo2"),
            account("acc5", "Credit Card", "Family Rewards Card", 3500, -1200, "****7890", "demo2"),
        ],
        transactions: transactions("demo2", "acc3", 1.6, today),
    }
}

// Demo Customer 3: Retiree
fn robert(today: NaiveDate) -> CustomerRecord {
    CustomerRecord {
        customer: customer(
            "demo3", "robert", "Robert", "Williams", "789", "Pine Street", "Miami", "FL", "33101",
        ),
        password: "password123",
        accounts: vec![
            account("acc6", "Checking", "Retirement Checking", 500, 2800, "****2468", "demo3"),
            account("acc7", "Savings", "Travel Fund", 0, 25000, "****1357", "demo3"),
        ],
        transactions: transactions("demo3", "acc6", 0.55, today),
    }
}

// Demo Customer 4: Student
fn emma(today: NaiveDate) -> CustomerRecord {
    CustomerRecord {
        customer: customer(
            "demo4", "emma", "Emma", "Davis", "321", "University Blvd", "Boston", "MA", "02115",
        ),
        password: "password123",
        accounts: vec![account(
            "acc8", "Checking", "Student Checking", 200, 450, "****3691", "demo4",
        )],
        transactions: transactions("demo4", "acc8", 0.3, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_by_id_and_username() {
        let provider = MockProvider::new();
        let by_id = provider.customer("demo1").await.unwrap();
        let by_username = provider.customer("sarah").await.unwrap();
        assert_eq!(by_id.id, by_username.id);
        assert_eq!(by_id.first_name, "Sarah");
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let provider = MockProvider::new();
        assert!(matches!(
            provider.customer("unknown").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let provider = MockProvider::new();

        let customer = provider.login("sarah", "password123").await.unwrap();
        assert_eq!(customer.first_name, "Sarah");
        assert_eq!(customer.last_name, "Johnson");

        assert!(matches!(
            provider.login("sarah", "wrong").await,
            Err(Error::Auth(_))
        ));
        assert!(matches!(
            provider.login("nobody", "password123").await,
            Err(Error::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_transactions_are_deterministic() {
        let provider = MockProvider::new();
        let a = provider.transactions("demo1").await.unwrap();
        let b = provider.transactions("demo1").await.unwrap();

        assert_eq!(a.len(), TRANSACTION_TEMPLATE.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.amount, y.amount);
            assert_eq!(x.transaction_date, y.transaction_date);
        }
    }

    #[tokio::test]
    async fn test_scaling_differs_per_customer() {
        let provider = MockProvider::new();
        let sarah_txs = provider.transactions("demo1").await.unwrap();
        let michael_txs = provider.transactions("demo2").await.unwrap();

        assert_eq!(sarah_txs[0].amount, -45.50);
        assert_eq!(michael_txs[0].amount, -72.80);
    }

    #[tokio::test]
    async fn test_all_demo_customers_present() {
        let provider = MockProvider::new();
        assert_eq!(provider.usernames(), vec!["sarah", "michael", "robert", "emma"]);
        for id in ["demo1", "demo2", "demo3", "demo4"] {
            assert!(provider.customer(id).await.is_ok());
        }
    }
}
