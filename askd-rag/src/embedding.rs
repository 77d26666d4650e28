//! Embedding generation.
//!
//! [`EmbeddingProvider`] is the seam between the retrieval pipeline and
//! whatever model turns text into vectors. The built-in [`HashEmbedder`] is
//! local and fully deterministic; a remote OpenAI-compatible backend lives
//! in the `remote` module behind the `remote-embeddings` feature.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-dimension embedding vectors.
///
/// Providers must be deterministic for a given model version: the same text
/// always yields the same vector. `embed_batch` must produce exactly the
/// vectors that element-wise `embed` calls would; the default implementation
/// guarantees this by delegating, and backends with a native batch path must
/// preserve it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts.
    ///
    /// The default implementation embeds each text in turn. Backends that
    /// support native batching should override this as a performance path.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Dimensionality of every vector this provider produces.
    fn dimensions(&self) -> usize;
}

/// A local, deterministic embedding provider.
///
/// Hashes the text bytes and projects the hash into an L2-normalized vector
/// whose direction depends on the content. No network, no model files,
/// byte-identical output across runs. That makes it both the default
/// provider when no remote backend is configured and the reproducible stub
/// for tests.
///
/// Similar texts do not land near each other beyond shared exact content;
/// retrieval quality comes from a real model, determinism comes from this
/// one.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// The default vector width.
    pub const DEFAULT_DIMENSIONS: usize = 64;

    /// Create a provider producing vectors of the given width.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let hash = text
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));

        let mut vector = vec![0.0f32; self.dimensions];
        for (i, v) in vector.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }

        // L2-normalize so cosine similarity reduces to a dot product.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeddings_are_deterministic() {
        let embedder = HashEmbedder::new(32);
        let a = embedder.embed("the capital of France").await.unwrap();
        let b = embedder.embed("the capital of France").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn different_texts_embed_differently() {
        let embedder = HashEmbedder::new(32);
        let a = embedder.embed("alpha").await.unwrap();
        let b = embedder.embed("beta").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn vectors_have_declared_dimension_and_unit_norm() {
        let embedder = HashEmbedder::new(48);
        let v = embedder.embed("some text").await.unwrap();

        assert_eq!(v.len(), 48);
        assert_eq!(embedder.dimensions(), 48);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn batch_matches_elementwise_calls() {
        let embedder = HashEmbedder::default();
        let texts = ["one", "two", "three"];

        let batched = embedder.embed_batch(&texts).await.unwrap();

        for (text, batch_vector) in texts.iter().zip(&batched) {
            let single = embedder.embed(text).await.unwrap();
            assert_eq!(&single, batch_vector);
        }
    }
}
