//! Chat assistant handlers
//!
//! Both endpoints prime the LLM with the customer's dashboard snapshot and
//! bounded conversation history. An LLM failure never fails the request:
//! general chat answers with a canned message, insight-detail chat with a
//! reply synthesized from the insight's own fields.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::warn;

use crate::{AppError, AppState};
use finsights_core::{
    build_messages, insight_context, insight_fallback, insight_question, ChatTurn,
    DashboardSnapshot, SpendingInsight, CHAT_FALLBACK,
};

/// Request body for POST /api/chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Request body for POST /api/chat/insight
#[derive(Debug, Deserialize)]
pub struct InsightChatRequest {
    pub insight: SpendingInsight,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// POST /api/chat - General financial-advice conversation
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if request.username.is_empty() {
        return Err(AppError::bad_request("username required"));
    }

    let snapshot = state.provider.dashboard(&request.username).await?;
    let response = assistant_reply(
        &state,
        &snapshot,
        "General financial advice",
        &request.history,
        &request.message,
    )
    .await
    .unwrap_or_else(|| CHAT_FALLBACK.to_string());

    Ok(Json(serde_json::json!({
        "response": response,
        "username": request.username,
    })))
}

/// POST /api/chat/insight - Drill into one insight
pub async fn chat_insight(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InsightChatRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if request.username.is_empty() {
        return Err(AppError::bad_request("username required"));
    }

    let snapshot = state.provider.dashboard(&request.username).await?;
    let context = insight_context(&request.insight);
    let question = insight_question(&request.insight);

    let response = assistant_reply(&state, &snapshot, &context, &request.history, &question)
        .await
        .unwrap_or_else(|| insight_fallback(&request.insight));

    Ok(Json(serde_json::json!({
        "response": response,
        "insight": request.insight,
        "username": request.username,
    })))
}

/// Run one assistant turn through the LLM, or None when the client is
/// missing or the call fails (callers pick the fallback text).
async fn assistant_reply(
    state: &AppState,
    snapshot: &DashboardSnapshot,
    context: &str,
    history: &[ChatTurn],
    user_message: &str,
) -> Option<String> {
    let llm = state.llm.as_ref()?;
    let messages = build_messages(snapshot, context, history, user_message);

    match llm.chat(messages).await {
        Ok(response) => Some(response),
        Err(e) => {
            warn!(error = %e, "Chat completion failed, using fallback response");
            None
        }
    }
}
