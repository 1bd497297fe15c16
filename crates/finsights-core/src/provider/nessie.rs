//! Nessie sandbox banking API client
//!
//! Read-only client for the Capital One Nessie sandbox. Responses for list
//! endpoints arrive in a `{results, total}` envelope; individual records
//! that fail to deserialize are skipped rather than failing the whole call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Account, Customer, Transaction};

use super::BankDataProvider;

const BASE_URL: &str = "http://api.nessieisreal.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Standard Nessie list-response envelope
#[derive(Debug, Deserialize)]
struct NessieResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Client for the Nessie sandbox API
#[derive(Clone)]
pub struct NessieClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl NessieClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}?key={}", self.base_url, path, self.api_key);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Nessie request failed with status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch a list endpoint and decode each envelope result, skipping
    /// records that do not match the expected shape.
    async fn get_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value = self.get_json(path).await?;
        let envelope: NessieResponse = serde_json::from_value(value)?;

        Ok(envelope
            .results
            .into_iter()
            .filter_map(|result| serde_json::from_value(result).ok())
            .collect())
    }

    async fn account_transactions(&self, account_id: &str) -> Result<Vec<Transaction>> {
        self.get_list(&format!("/enterprise/accounts/{}/transactions", account_id))
            .await
    }
}

#[async_trait]
impl BankDataProvider for NessieClient {
    async fn customer(&self, customer_id: &str) -> Result<Customer> {
        let value = self
            .get_json(&format!("/enterprise/customers/{}", customer_id))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn accounts(&self, customer_id: &str) -> Result<Vec<Account>> {
        self.get_list(&format!("/enterprise/customers/{}/accounts", customer_id))
            .await
    }

    async fn transactions(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        let accounts = self.accounts(customer_id).await?;
        let mut all = Vec::new();

        for acct in &accounts {
            match self.account_transactions(&acct.id).await {
                Ok(mut txs) => all.append(&mut txs),
                // One bad account should not sink the whole customer view.
                Err(e) => {
                    warn!(account = %acct.id, error = %e, "Failed to fetch account transactions");
                }
            }
        }

        Ok(all)
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<Customer> {
        // The sandbox has no credential store; login is a fixture feature.
        Err(Error::Auth("login is not supported by the Nessie provider".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_skips_malformed_results() {
        let raw = serde_json::json!({
            "results": [
                {
                    "_id": "acc1",
                    "type": "Checking",
                    "nickname": "Primary",
                    "rewards": 10,
                    "balance": 100,
                    "account_number": "****1111",
                    "customer_id": "c1"
                },
                {"garbage": true}
            ],
            "total": 2
        });
        let envelope: NessieResponse = serde_json::from_value(raw).unwrap();
        let accounts: Vec<Account> = envelope
            .results
            .into_iter()
            .filter_map(|r| serde_json::from_value(r).ok())
            .collect();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, "acc1");
    }

    #[tokio::test]
    async fn test_login_unsupported() {
        let client = NessieClient::new("test-key");
        assert!(matches!(
            client.login("sarah", "password123").await,
            Err(Error::Auth(_))
        ));
    }
}
