//! Customer, account, and transaction lookup handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{AppError, AppState};
use finsights_core::{BankDataProvider, Customer};

use super::CustomerQuery;

/// GET /api/accounts?customerId= - All accounts for a customer
pub async fn get_accounts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let customer_id = params.require()?;
    let accounts = state.provider.accounts(customer_id).await?;

    Ok(Json(serde_json::json!({ "accounts": accounts })))
}

/// GET /api/customer?customerId= - Customer profile
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<Customer>, AppError> {
    let customer_id = params.require()?;
    let customer = state.provider.customer(customer_id).await?;

    Ok(Json(customer))
}

/// GET /api/transactions?customerId= - All transactions across accounts
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let customer_id = params.require()?;
    let transactions = state.provider.transactions(customer_id).await?;

    Ok(Json(serde_json::json!({ "transactions": transactions })))
}
