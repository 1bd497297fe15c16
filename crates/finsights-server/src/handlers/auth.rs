//! Login handler
//!
//! Credentialed login against the data provider. This is a demo stub, not a
//! session system: success returns the customer's display identity, failure
//! returns 401.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{AppError, AppState};
use finsights_core::{BankDataProvider, Error};

/// Request body for POST /api/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/login - Validate credentials against the data provider
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AppError::bad_request("username and password required"));
    }

    let customer = state
        .provider
        .login(&request.username, &request.password)
        .await
        .map_err(|e| match e {
            Error::Auth(_) => {
                AppError::unauthorized("Username or password not found, try again")
            }
            other => AppError::from(other),
        })?;

    Ok(Json(serde_json::json!({
        "username": customer.username,
        "firstName": customer.first_name,
        "lastName": customer.last_name,
    })))
}
