//! # askd-model
//!
//! Text-generation backends for the askd question-answering service.
//!
//! ## Overview
//!
//! - [`Llm`] — the prompt-in, text-out trait every backend implements
//! - [`OpenAIChatClient`] — OpenAI and OpenAI-compatible `/chat/completions`
//!   APIs (Ollama, vLLM, and the like via [`OpenAIConfig::compatible`])
//! - [`MockLlm`] — scripted backend for tests and keyless demos
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use askd_model::{Llm, OpenAIChatClient, OpenAIConfig};
//!
//! # async fn demo() -> askd_model::Result<()> {
//! let client = OpenAIChatClient::new(OpenAIConfig::from_env()?)?;
//! let answer = client.generate("What is the capital of France?").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod llm;
pub mod mock;
pub mod openai;

pub use error::{ModelError, Result};
pub use llm::Llm;
pub use mock::MockLlm;
pub use openai::{OpenAIChatClient, OpenAIConfig};
