//! Remote embedding provider for OpenAI-compatible `/embeddings` endpoints.
//!
//! Only available when the `remote-embeddings` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_DIMENSIONS: usize = 1536;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
///
/// Any service exposing the `/embeddings` wire shape works: set a different
/// base URL for self-hosted or alternative providers. Requests are bounded
/// by a client-level timeout; a timeout surfaces as
/// [`RagError::Embedding`] like any other transport failure.
pub struct RemoteEmbedder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl RemoteEmbedder {
    /// Create a provider with the given API key and the default endpoint,
    /// model, and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Embedding {
                provider: "remote".into(),
                message: "API key must not be empty".into(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| RagError::Embedding {
                provider: "remote".into(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a provider from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| RagError::Embedding {
            provider: "remote".into(),
            message: "OPENAI_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key)
    }

    /// Override the endpoint base URL (for OpenAI-compatible services).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the embedding model and its output dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

/// Pull a human-readable message out of an API error body, falling back to
/// the raw body when it does not match the `{"error": {"message"}}` shape.
fn api_error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl EmbeddingProvider for RemoteEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors.pop().ok_or_else(|| RagError::Embedding {
            provider: "remote".into(),
            message: "API returned an empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), model = %self.model, "embedding batch");

        let url = format!("{}/embeddings", self.base_url.trim_end_matches('/'));
        let request = EmbeddingsRequest { model: &self.model, input: texts };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embedding request failed");
                RagError::Embedding {
                    provider: "remote".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "embedding API error");
            return Err(RagError::Embedding {
                provider: "remote".into(),
                message: format!("API returned {status}: {}", api_error_detail(&body)),
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse embedding response");
            RagError::Embedding {
                provider: "remote".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        if parsed.data.len() != texts.len() {
            return Err(RagError::Embedding {
                provider: "remote".into(),
                message: format!(
                    "API returned {} embeddings for {} inputs",
                    parsed.data.len(),
                    texts.len()
                ),
            });
        }

        Ok(parsed.data.into_iter().map(|row| row.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
