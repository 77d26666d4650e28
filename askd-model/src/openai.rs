//! OpenAI-compatible chat-completion client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ModelError, Result};
use crate::llm::Llm;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.1;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`OpenAIChatClient`].
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Bearer credential for the API.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Endpoint base URL; point this at any OpenAI-compatible service.
    pub base_url: String,
    /// Sampling temperature. Kept low: answers should restate retrieved
    /// context, not improvise.
    pub temperature: f32,
    /// Upper bound on each generation request.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Configuration for the hosted OpenAI API with the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration for an OpenAI-compatible API at a custom base URL.
    pub fn compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_MODEL` and `OPENAI_BASE_URL`
    /// override the defaults when set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::Config("OPENAI_API_KEY environment variable not set".into()))?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// An [`Llm`] backed by an OpenAI-compatible `/chat/completions` endpoint.
///
/// Requests are plain (non-streaming) chat completions over `reqwest`. Any
/// transport failure, non-success status, or timeout surfaces as
/// [`ModelError::Request`]; a response without generated text surfaces as
/// [`ModelError::MalformedResponse`].
#[derive(Debug)]
pub struct OpenAIChatClient {
    client: reqwest::Client,
    config: OpenAIConfig,
}

impl OpenAIChatClient {
    /// Create a client from a validated configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ModelError::Config("API key must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a client from the environment (see [`OpenAIConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }
}

// ── Chat completions wire types ────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
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
impl Llm for OpenAIChatClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.config.model, prompt_len = prompt.len(), "generating completion");

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage { role: "user", content: prompt }],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "generation request failed");
                ModelError::Request {
                    provider: "OpenAI".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "generation API error");
            return Err(ModelError::Request {
                provider: "OpenAI".into(),
                message: format!("API returned {status}: {}", api_error_detail(&body)),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse generation response");
            ModelError::MalformedResponse {
                provider: "OpenAI".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModelError::MalformedResponse {
                provider: "OpenAI".into(),
                message: "response contained no generated text".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = OpenAIChatClient::new(OpenAIConfig::new("")).unwrap_err();
        assert!(matches!(err, ModelError::Config(_)));
    }

    #[test]
    fn compatible_config_overrides_endpoint_and_model() {
        let config = OpenAIConfig::compatible("key", "http://localhost:11434/v1", "llama3");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let config = OpenAIConfig::compatible("key", "http://127.0.0.1:9", "any")
            .with_timeout(Duration::from_millis(200));
        let client = OpenAIChatClient::new(config).unwrap();

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, ModelError::Request { .. }));
    }
}
