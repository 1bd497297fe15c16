//! Dashboard handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{AppError, AppState};
use finsights_core::DashboardSnapshot;

use super::CustomerQuery;

/// GET /api/dashboard?customerId= - Full dashboard snapshot
///
/// Spending analytics are derived fresh from the customer's transactions on
/// every call; nothing is cached across requests.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let customer_id = params.require()?;
    let snapshot = state.provider.dashboard(customer_id).await?;

    Ok(Json(snapshot))
}
