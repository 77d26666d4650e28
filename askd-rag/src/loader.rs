//! Knowledge-base loading.
//!
//! The knowledge base is a JSON array of objects, each carrying a `content`
//! string and any number of additional fields. Extra fields are preserved
//! verbatim as document metadata.

use std::path::Path;

use tracing::info;

use crate::document::Document;
use crate::error::{RagError, Result};

/// Load an ordered sequence of [`Document`]s from a JSON corpus file.
///
/// Source order is preserved. Fails with [`RagError::Load`] if the file is
/// missing or unreadable, if the top level is not an array of objects, or if
/// any record lacks a string `content` field.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let load_error = |message: String| RagError::Load {
        path: path.display().to_string(),
        message,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let documents: Vec<Document> =
        serde_json::from_str(&raw).map_err(|e| load_error(format!("invalid corpus: {e}")))?;

    info!(
        path = %path.display(),
        document_count = documents.len(),
        "loaded knowledge base"
    );

    Ok(documents)
}
