//! The text-generation trait.

use async_trait::async_trait;

use crate::error::Result;

/// A prompt-in, text-out generation backend.
///
/// Any hosted or local text-generation service fits behind this trait; the
/// vendor is a configuration choice, not a design constraint. Calls are
/// plain request/response; nothing streams.
#[async_trait]
pub trait Llm: Send + Sync {
    /// A short identifier for the backing model, used in logs.
    fn name(&self) -> &str;

    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
