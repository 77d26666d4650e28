//! In-memory vector index with cosine-similarity search.
//!
//! The index is built once at startup from parallel chunk/vector sequences
//! and is read-only afterwards. Shared references can serve any number of
//! concurrent searches without locking.

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};

/// An immutable nearest-neighbor index over chunk embeddings.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorIndex {
    /// Build an index from parallel sequences of chunks and their vectors.
    ///
    /// Fails with [`RagError::Config`] if the sequences differ in length or
    /// the vectors do not all share one non-zero dimension. An empty corpus
    /// builds an empty index.
    pub fn build(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != vectors.len() {
            return Err(RagError::Config(format!(
                "index inputs out of step: {} chunks but {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let dimension = vectors.first().map_or(0, Vec::len);
        if !vectors.is_empty() && dimension == 0 {
            return Err(RagError::Config("embedding vectors must not be empty".into()));
        }
        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != dimension {
                return Err(RagError::Config(format!(
                    "inconsistent embedding dimension: vector {i} has {} entries, expected {dimension}",
                    vector.len()
                )));
            }
        }

        Ok(Self { chunks, vectors, dimension })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Dimensionality of the indexed vectors, or `None` for an empty index.
    pub fn dimension(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.dimension)
    }

    /// Return the `k` chunks nearest to `query`, most similar first.
    ///
    /// `k` is clamped to the index size, so fewer than `k` results come back
    /// only when the index is smaller than `k`. Equal scores keep their
    /// insertion order. An empty index matches nothing, regardless of the
    /// query. Fails with [`RagError::Dimension`] if the query width differs
    /// from the index.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(RagError::Dimension {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .zip(&self.vectors)
            .map(|(chunk, vector)| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(vector, query),
            })
            .collect();

        // Stable sort: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(doc_index: usize, text: &str) -> Chunk {
        Chunk { text: text.to_string(), doc_index, chunk_index: 0 }
    }

    fn sample_index() -> VectorIndex {
        VectorIndex::build(
            vec![chunk(0, "east"), chunk(1, "north"), chunk(2, "northeast")],
            vec![
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![0.7, 0.7],
            ],
        )
        .unwrap()
    }

    #[test]
    fn build_rejects_length_mismatch() {
        let err = VectorIndex::build(vec![chunk(0, "a")], vec![]).unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn build_rejects_inconsistent_dimensions() {
        let err = VectorIndex::build(
            vec![chunk(0, "a"), chunk(1, "b")],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn build_rejects_zero_width_vectors() {
        let err = VectorIndex::build(vec![chunk(0, "a")], vec![vec![]]).unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn search_returns_nearest_first() {
        let index = sample_index();
        let results = index.search(&[1.0, 0.1], 3).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].chunk.text, "east");
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn k_is_clamped_to_index_size() {
        let index = sample_index();
        let results = index.search(&[1.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = VectorIndex::build(
            vec![chunk(0, "first"), chunk(1, "second"), chunk(2, "third")],
            vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]],
        )
        .unwrap();

        let results = index.search(&[1.0, 0.0], 3).unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let index = sample_index();
        let err = index.search(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, RagError::Dimension { expected: 2, actual: 3 }));
    }

    #[test]
    fn empty_index_matches_nothing() {
        let index = VectorIndex::build(Vec::new(), Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.dimension(), None);
        assert!(index.search(&[1.0, 2.0], 5).unwrap().is_empty());
    }

    #[test]
    fn rebuilding_from_same_inputs_searches_identically() {
        let chunks = vec![chunk(0, "alpha"), chunk(1, "beta"), chunk(2, "gamma")];
        let vectors = vec![vec![0.9, 0.1], vec![0.2, 0.8], vec![0.5, 0.5]];

        let first = VectorIndex::build(chunks.clone(), vectors.clone()).unwrap();
        let second = VectorIndex::build(chunks, vectors).unwrap();

        let query = [0.6, 0.4];
        let a = first.search(&query, 3).unwrap();
        let b = second.search(&query, 3).unwrap();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.chunk, y.chunk);
            assert_eq!(x.score, y.score);
        }
    }
}
