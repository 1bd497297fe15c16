//! Bank data providers
//!
//! The core analytics are agnostic to where customer/account/transaction
//! records come from. Two providers exist: static in-memory demo fixtures
//! and the Nessie sandbox banking API.

mod mock;
mod nessie;

pub use mock::MockProvider;
pub use nessie::NessieClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Account, Customer, DashboardSnapshot, Transaction};
use crate::spending::aggregate;

/// Trait defining the interface for all bank data sources
///
/// Implementations must be Send + Sync; all state is read-only after
/// construction, so unsynchronized concurrent reads are safe.
#[async_trait]
pub trait BankDataProvider: Send + Sync {
    /// Fetch a customer by id
    async fn customer(&self, customer_id: &str) -> Result<Customer>;

    /// Fetch all accounts for a customer
    async fn accounts(&self, customer_id: &str) -> Result<Vec<Account>>;

    /// Fetch all transactions across all of a customer's accounts
    async fn transactions(&self, customer_id: &str) -> Result<Vec<Transaction>>;

    /// Validate login credentials and return the matching customer
    async fn login(&self, username: &str, password: &str) -> Result<Customer>;
}

/// Concrete provider enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum DataProvider {
    /// Static in-memory demo fixtures
    Mock(MockProvider),
    /// Nessie sandbox banking API
    Nessie(NessieClient),
}

impl DataProvider {
    /// Demo fixture provider
    pub fn mock() -> Self {
        DataProvider::Mock(MockProvider::new())
    }

    /// Nessie sandbox provider with the given API key
    pub fn nessie(api_key: &str) -> Self {
        DataProvider::Nessie(NessieClient::new(api_key))
    }

    /// Short name for startup logging
    pub fn name(&self) -> &'static str {
        match self {
            DataProvider::Mock(_) => "mock",
            DataProvider::Nessie(_) => "nessie",
        }
    }

    /// Assemble one customer's full dashboard snapshot, deriving the
    /// spending analytics fresh from the raw transactions.
    pub async fn dashboard(&self, customer_id: &str) -> Result<DashboardSnapshot> {
        let customer = self.customer(customer_id).await?;
        let accounts = self.accounts(customer_id).await?;
        let transactions = self.transactions(customer_id).await?;
        let spending_data = aggregate(&transactions);

        Ok(DashboardSnapshot {
            customer,
            accounts,
            transactions,
            spending_data,
        })
    }
}

#[async_trait]
impl BankDataProvider for DataProvider {
    async fn customer(&self, customer_id: &str) -> Result<Customer> {
        match self {
            DataProvider::Mock(p) => p.customer(customer_id).await,
            DataProvider::Nessie(p) => p.customer(customer_id).await,
        }
    }

    async fn accounts(&self, customer_id: &str) -> Result<Vec<Account>> {
        match self {
            DataProvider::Mock(p) => p.accounts(customer_id).await,
            DataProvider::Nessie(p) => p.accounts(customer_id).await,
        }
    }

    async fn transactions(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        match self {
            DataProvider::Mock(p) => p.transactions(customer_id).await,
            DataProvider::Nessie(p) => p.transactions(customer_id).await,
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<Customer> {
        match self {
            DataProvider::Mock(p) => p.login(username, password).await,
            DataProvider::Nessie(p) => p.login(username, password).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_spending_is_derived() {
        let provider = DataProvider::mock();
        let snapshot = provider.dashboard("demo1").await.unwrap();

        let from_transactions = aggregate(&snapshot.transactions);
        assert_eq!(
            snapshot.spending_data.total_monthly_spend,
            from_transactions.total_monthly_spend
        );
        assert!(!snapshot.spending_data.category_spending.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_customer_not_found() {
        let provider = DataProvider::mock();
        let err = provider.dashboard("nobody").await.unwrap_err();
        assert!(matches!(err, crate::Error::NotFound(_)));
    }
}
