//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod accounts;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod insights;

// Re-export all handlers for use in router
pub use accounts::*;
pub use auth::*;
pub use chat::*;
pub use dashboard::*;
pub use insights::*;

use serde::Deserialize;

use crate::AppError;

/// Query parameters shared by the customer-scoped GET endpoints
#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
}

impl CustomerQuery {
    /// The customer id, or the documented 400 when it is missing
    pub fn require(&self) -> Result<&str, AppError> {
        self.customer_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::bad_request("customerId required"))
    }
}
