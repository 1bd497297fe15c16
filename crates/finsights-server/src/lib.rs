//! FinSights Web Server
//!
//! Axum-based REST API for the FinSights personal finance backend.
//!
//! Every request is handled independently over request-scoped data; the only
//! shared state is the read-only data provider and the optional LLM client.
//! Upstream failures (banking API, LLM) are recovered with local fallbacks
//! wherever one is documented; all error responses carry a stable
//! `{"error": "..."}` body.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use finsights_core::{DataProvider, LlmClient};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = any origin, the demo-frontend default)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Read-only bank data source (fixtures or Nessie)
    pub provider: DataProvider,
    /// Optional LLM client; None runs every AI feature on local fallbacks
    pub llm: Option<LlmClient>,
}

/// Health probe response
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "FinSights API is running"
    }))
}

/// Create the application router
pub fn create_router(provider: DataProvider, llm: Option<LlmClient>, config: ServerConfig) -> Router {
    if let Some(ref client) = llm {
        info!("LLM client configured: {} (model: {})", client.host(), client.model());
    } else {
        info!("LLM client not configured (set OPENAI_API_KEY to enable); using local fallbacks");
    }

    let state = Arc::new(AppState { provider, llm });

    let api_routes = Router::new()
        // Auth
        .route("/login", post(handlers::login))
        // Customer data
        .route("/accounts", get(handlers::get_accounts))
        .route("/customer", get(handlers::get_customer))
        .route("/transactions", get(handlers::get_transactions))
        .route("/dashboard", get(handlers::get_dashboard))
        // Insights
        .route("/insights", get(handlers::get_insights))
        .route(
            "/ai-insights",
            get(handlers::get_ai_insights).post(handlers::post_ai_insights),
        )
        // Chat assistant
        .route("/chat", post(handlers::chat))
        .route("/chat/insight", post(handlers::chat_insight));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    provider: DataProvider,
    llm: Option<LlmClient>,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(provider, llm, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<finsights_core::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<finsights_core::Error> for AppError {
    fn from(err: finsights_core::Error) -> Self {
        use finsights_core::Error;
        match err {
            Error::NotFound(ref msg) => Self {
                status: StatusCode::NOT_FOUND,
                message: msg.clone(),
                internal: Some(err),
            },
            Error::Auth(ref msg) => Self {
                status: StatusCode::UNAUTHORIZED,
                message: msg.clone(),
                internal: Some(err),
            },
            // Upstream/transport details stay in the logs; clients get a
            // generic message.
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(err),
            },
        }
    }
}
