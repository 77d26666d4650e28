use std::sync::Arc;

use askd_model::{Llm, OpenAIChatClient};
use askd_rag::HashEmbedder;
use askd_server::config::{ServerConfig, ServiceConfig};
use askd_server::rest::{AppState, run_server};
use askd_server::service::{QueryService, ServiceState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = AppState { service: Arc::new(build_service().await) };
    run_server(ServerConfig::from_env(), state).await
}

/// Run the startup pipeline, capturing any failure into the degraded state
/// instead of exiting: the server still binds and reports the failure on
/// every request.
async fn build_service() -> ServiceState {
    match initialize().await {
        Ok(service) => ServiceState::Ready(service),
        Err(reason) => {
            error!(error = %reason, "startup failed; serving in unavailable state");
            ServiceState::Unavailable { reason: format!("{reason:#}") }
        }
    }
}

async fn initialize() -> anyhow::Result<QueryService> {
    let config = ServiceConfig::from_env();

    // Generation credentials are validated before the (potentially slow)
    // indexing work.
    let llm = OpenAIChatClient::from_env()?;
    info!(model = %llm.name(), corpus = %config.knowledge_base.display(), "initializing");

    let service = QueryService::initialize(
        &config.knowledge_base,
        config.rag,
        Arc::new(HashEmbedder::default()),
        Arc::new(llm),
    )
    .await?;

    Ok(service)
}
