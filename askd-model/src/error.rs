//! Error types for the `askd-model` crate.

use thiserror::Error;

/// Errors that can occur while synthesizing text with a model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A configuration validation error (missing credentials, bad URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generation request could not be completed: unreachable host,
    /// timeout, or a non-success status from the provider.
    #[error("Generation request failed ({provider}): {message}")]
    Request {
        /// The backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider answered, but the response did not contain the expected
    /// generated text.
    #[error("Malformed generation response ({provider}): {message}")]
    MalformedResponse {
        /// The backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
