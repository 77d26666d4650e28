//! # askd-rag
//!
//! Knowledge-base loading, chunking, embedding, and vector retrieval for the
//! askd question-answering service.
//!
//! ## Overview
//!
//! The crate covers the build-time half of a retrieval pipeline and the
//! per-query search:
//!
//! - [`loader::load_documents`] — read a JSON corpus into [`Document`]s
//! - [`Chunker`] implementations — split content into bounded, overlapping
//!   [`Chunk`]s
//! - [`EmbeddingProvider`] — text → fixed-dimension vectors, with the local
//!   deterministic [`HashEmbedder`] built in and a remote OpenAI-compatible
//!   backend behind the `remote-embeddings` feature
//! - [`VectorIndex`] — build-once cosine-similarity search
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use askd_rag::{
//!     Chunker, EmbeddingProvider, HashEmbedder, RagConfig, RecursiveChunker, VectorIndex,
//!     loader::load_documents,
//! };
//!
//! # async fn build() -> askd_rag::Result<()> {
//! let config = RagConfig::builder().chunk_size(1000).chunk_overlap(150).build()?;
//! let documents = load_documents("data/knowledge_base.json")?;
//!
//! let chunker = RecursiveChunker::new(config.chunk_size, config.chunk_overlap);
//! let chunks: Vec<_> = documents
//!     .iter()
//!     .enumerate()
//!     .flat_map(|(i, doc)| chunker.chunk(i, &doc.content))
//!     .collect();
//!
//! let embedder = HashEmbedder::default();
//! let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
//! let vectors = embedder.embed_batch(&texts).await?;
//!
//! let index = VectorIndex::build(chunks, vectors)?;
//! let hits = index.search(&embedder.embed("a question").await?, config.top_k)?;
//! # Ok(())
//! # }
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod loader;
#[cfg(feature = "remote-embeddings")]
pub mod remote;

pub use chunking::{Chunker, FixedSizeChunker, RecursiveChunker};
pub use config::RagConfig;
pub use document::{Chunk, Document, Metadata, SearchResult};
pub use embedding::{EmbeddingProvider, HashEmbedder};
pub use error::{RagError, Result};
pub use index::VectorIndex;
#[cfg(feature = "remote-embeddings")]
pub use remote::RemoteEmbedder;
