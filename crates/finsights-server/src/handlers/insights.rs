//! Insight handlers
//!
//! `/insights` serves the budget-less engine output alongside the raw
//! transactions. `/ai-insights` tries the LLM client first when one is
//! configured and no budget is supplied, and substitutes the local engine's
//! deterministic output on any failure, so the endpoint answers 200 with
//! real insights even when the LLM is down.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{AppError, AppState};
use finsights_core::{generate_insights, BudgetMap, SpendingInsight};

use super::CustomerQuery;

/// Request body for POST /api/ai-insights
#[derive(Debug, Deserialize)]
pub struct AiInsightsRequest {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    /// Per-category budget ceilings from the budget page
    #[serde(rename = "budgetData", default)]
    pub budget_data: BudgetMap,
}

/// GET /api/insights?customerId= - Locally generated generic insights
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let customer_id = params.require()?;
    let snapshot = state.provider.dashboard(customer_id).await?;

    let spending = &snapshot.spending_data;
    let insights = generate_insights(
        &spending.category_spending,
        spending.total_monthly_spend,
        None,
    );

    Ok(Json(serde_json::json!({
        "customerId": customer_id,
        "transactions": snapshot.transactions,
        "insights": insights,
    })))
}

/// GET /api/ai-insights?customerId= - AI insights without budget data
pub async fn get_ai_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let customer_id = params.require()?.to_string();
    let insights = ai_insights_for(&state, &customer_id, None).await?;

    Ok(Json(serde_json::json!({
        "customerId": customer_id,
        "insights": insights,
    })))
}

/// POST /api/ai-insights - AI insights with optional per-category budgets
pub async fn post_ai_insights(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AiInsightsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let customer_id = request
        .customer_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("customerId required"))?
        .to_string();

    let budget = if request.budget_data.total() > 0.0 {
        Some(request.budget_data)
    } else {
        None
    };
    let insights = ai_insights_for(&state, &customer_id, budget.as_ref()).await?;

    Ok(Json(serde_json::json!({
        "customerId": customer_id,
        "insights": insights,
    })))
}

/// Produce the insight list for one customer.
///
/// With a budget the local engine is authoritative (the budget comparison is
/// deterministic arithmetic, not a language task). Without one, a configured
/// LLM gets the first attempt; its failure falls back to the engine. The
/// engine always emits at least the overall insight, but the endpoint is
/// still guarded with a canned welcome insight just in case.
async fn ai_insights_for(
    state: &AppState,
    customer_id: &str,
    budget: Option<&BudgetMap>,
) -> Result<Vec<SpendingInsight>, AppError> {
    let snapshot = state.provider.dashboard(customer_id).await?;
    let spending = &snapshot.spending_data;

    if budget.is_none() {
        if let Some(ref llm) = state.llm {
            match llm.generate_insights(spending).await {
                Ok(insights) => return Ok(insights),
                Err(e) => {
                    warn!(customer = %customer_id, error = %e, "AI insight generation failed, using local engine");
                }
            }
        }
    }

    let insights = generate_insights(
        &spending.category_spending,
        spending.total_monthly_spend,
        budget,
    );

    if insights.is_empty() {
        return Ok(vec![welcome_insight()]);
    }
    Ok(insights)
}

/// Last-resort placeholder so the endpoint never answers with nothing
fn welcome_insight() -> SpendingInsight {
    SpendingInsight {
        title: "Welcome to AI Insights!".to_string(),
        description: "AI-powered financial insights are being generated for your spending patterns.".to_string(),
        category: "General".to_string(),
        amount: "Coming Soon".to_string(),
        tip: "Check back soon for personalized financial advice based on your spending habits.".to_string(),
    }
}
