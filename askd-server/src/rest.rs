//! HTTP surface.
//!
//! One answering endpoint plus a health probe, CORS open to all origins.
//! Error bodies are generic by design: request failures are logged
//! server-side with full detail and never echoed to clients.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::service::{AnswerError, ServiceState};

/// Shared per-request state: the startup outcome, read-only.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ServiceState>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
}

/// Bind and serve until the process exits.
pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for askd-server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("askd listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.service.is_ready() { "ok" } else { "unavailable" };
    Json(json!({"status": status, "service": "askd"}))
}

async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    let question = request.query.as_deref().unwrap_or_default();
    let answer = state.service.answer(question).await.map_err(into_error_response)?;
    Ok(Json(answer))
}

/// Map request failures onto status codes and generic client-facing bodies.
fn into_error_response(err: AnswerError) -> (StatusCode, Json<ErrorBody>) {
    let (status, message) = match &err {
        AnswerError::EmptyQuery => (StatusCode::BAD_REQUEST, "Query is required"),
        AnswerError::Unavailable(reason) => {
            error!(reason = %reason, "rejected request: service unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Service is not ready. Check server logs for startup errors.",
            )
        }
        AnswerError::Retrieval(_) | AnswerError::Synthesis(_) => {
            error!(error = %err, "request processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your question.",
            )
        }
    };
    (status, Json(ErrorBody { error: message.to_string() }))
}
