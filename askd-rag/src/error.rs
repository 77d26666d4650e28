//! Error types for the `askd-rag` crate.

use thiserror::Error;

/// Errors that can occur while loading, indexing, or retrieving.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The knowledge base could not be read or did not have the expected
    /// shape. Fatal at startup.
    #[error("Failed to load knowledge base '{path}': {message}")]
    Load {
        /// Path of the corpus that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A query vector did not match the dimensionality of the index.
    #[error("Dimension mismatch: index holds {expected}-dimensional vectors, query has {actual}")]
    Dimension {
        /// The dimensionality the index was built with.
        expected: usize,
        /// The dimensionality of the offending query vector.
        actual: usize,
    },
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
