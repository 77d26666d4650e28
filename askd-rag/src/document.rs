//! Data types for knowledge-base documents, chunks, and search results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata attached to a document, preserved verbatim from the
/// knowledge-base file.
pub type Metadata = Map<String, Value>;

/// One knowledge-base entry.
///
/// Documents have no explicit id; identity is their position in the source
/// corpus. They are loaded once at startup and never modified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The text body.
    pub content: String,
    /// Any additional fields from the source record, kept as-is.
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// A bounded-length piece of one document's content.
///
/// Chunks are derived once at startup and are the unit of retrieval. The
/// back-reference to the source document is positional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The chunk text, a verbatim substring of the source content except
    /// for overlap duplication.
    pub text: String,
    /// Index of the originating [`Document`] in the corpus.
    pub doc_index: usize,
    /// Position of this chunk within its document's chunk sequence.
    pub chunk_index: usize,
}

/// A retrieved [`Chunk`] paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more relevant).
    pub score: f32,
}
