//! Mock generation backend for tests and keyless demos.

use async_trait::async_trait;

use crate::error::{ModelError, Result};
use crate::llm::Llm;

#[derive(Debug, Clone)]
enum Behavior {
    Fixed(String),
    Echo,
    Fail(String),
}

/// An [`Llm`] with scripted behavior.
///
/// # Example
///
/// ```rust
/// use askd_model::{Llm, MockLlm};
///
/// # async fn demo() -> askd_model::Result<()> {
/// let llm = MockLlm::fixed("canned answer");
/// assert_eq!(llm.generate("anything").await?, "canned answer");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockLlm {
    behavior: Behavior,
}

impl MockLlm {
    /// Always answer with the same text.
    pub fn fixed(reply: impl Into<String>) -> Self {
        Self { behavior: Behavior::Fixed(reply.into()) }
    }

    /// Answer with the prompt itself. Useful for asserting on prompt
    /// assembly end to end.
    pub fn echo() -> Self {
        Self { behavior: Behavior::Echo }
    }

    /// Fail every call with a [`ModelError::Request`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self { behavior: Behavior::Fail(message.into()) }
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        match &self.behavior {
            Behavior::Fixed(reply) => Ok(reply.clone()),
            Behavior::Echo => Ok(prompt.to_string()),
            Behavior::Fail(message) => Err(ModelError::Request {
                provider: "mock".into(),
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_reply_ignores_prompt() {
        let llm = MockLlm::fixed("the answer");
        assert_eq!(llm.generate("q1").await.unwrap(), "the answer");
        assert_eq!(llm.generate("q2").await.unwrap(), "the answer");
    }

    #[tokio::test]
    async fn echo_returns_the_prompt() {
        let llm = MockLlm::echo();
        assert_eq!(llm.generate("context then question").await.unwrap(), "context then question");
    }

    #[tokio::test]
    async fn failing_mock_fails_every_call() {
        let llm = MockLlm::failing("simulated timeout");
        let err = llm.generate("q").await.unwrap_err();
        assert!(matches!(err, ModelError::Request { .. }));
    }
}
