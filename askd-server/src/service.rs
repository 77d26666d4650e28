//! The query service: startup pipeline and per-request answering.
//!
//! [`QueryService::initialize`] runs the build-time pipeline once
//! (load → chunk → embed → index); the result is either a ready service or a
//! captured startup failure. [`ServiceState`] holds whichever happened for
//! the lifetime of the process; a failed startup leaves the HTTP surface
//! serving, with every request failing fast.

use std::path::Path;
use std::sync::Arc;

use askd_model::{Llm, ModelError};
use askd_rag::{
    Chunker, Document, EmbeddingProvider, Metadata, RagConfig, RagError, RecursiveChunker,
    SearchResult, VectorIndex, loader::load_documents,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Failures surfaced by [`ServiceState::answer`].
///
/// Startup failures are not represented here: they are captured once into
/// [`ServiceState::Unavailable`] and every request observes them as
/// [`AnswerError::Unavailable`].
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The request carried no question.
    #[error("Query is required")]
    EmptyQuery,

    /// The service failed to start; the reason was captured at startup.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Embedding or index search failed for this request.
    #[error(transparent)]
    Retrieval(#[from] RagError),

    /// The generation backend failed for this request.
    #[error(transparent)]
    Synthesis(#[from] ModelError),
}

/// A synthesized answer plus best-effort source metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// The generated answer text.
    pub answer: String,
    /// Metadata of the source document recovered for the top retrieved
    /// chunk; empty when nothing was retrieved or no source matched.
    pub metadata: Metadata,
}

/// The process-wide outcome of startup, shared read-only with every request.
pub enum ServiceState {
    /// Startup completed; requests are answered.
    Ready(QueryService),
    /// Startup failed; requests fail fast without attempting retrieval.
    Unavailable {
        /// The captured startup failure, for logs; never sent to clients.
        reason: String,
    },
}

impl ServiceState {
    /// Whether the service came up.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Answer one question.
    ///
    /// Empty or whitespace-only questions are rejected before anything
    /// else, including the availability check.
    pub async fn answer(&self, question: &str) -> Result<Answer, AnswerError> {
        if question.trim().is_empty() {
            return Err(AnswerError::EmptyQuery);
        }
        match self {
            Self::Ready(service) => service.answer(question).await,
            Self::Unavailable { reason } => Err(AnswerError::Unavailable(reason.clone())),
        }
    }
}

/// The assembled retrieval-and-answer pipeline.
///
/// Everything inside is read-only after construction; an `Arc`-shared
/// service answers any number of concurrent requests without locking.
pub struct QueryService {
    documents: Vec<Document>,
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn Llm>,
    top_k: usize,
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("documents", &self.documents.len())
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl QueryService {
    /// Build the service: load the corpus, chunk it, embed every chunk, and
    /// index the vectors.
    ///
    /// Any failure here is fatal to startup; the caller decides whether the
    /// process keeps serving in a degraded state (see [`ServiceState`]).
    pub async fn initialize(
        corpus_path: impl AsRef<Path>,
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn Llm>,
    ) -> askd_rag::Result<Self> {
        let documents = load_documents(corpus_path)?;

        let chunker = RecursiveChunker::new(config.chunk_size, config.chunk_overlap);
        let chunks: Vec<_> = documents
            .iter()
            .enumerate()
            .flat_map(|(doc_index, doc)| chunker.chunk(doc_index, &doc.content))
            .collect();

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = embedder.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed while indexing the corpus");
            e
        })?;

        let index = VectorIndex::build(chunks, vectors)?;
        info!(
            document_count = documents.len(),
            chunk_count = index.len(),
            model = llm.name(),
            "query service ready"
        );

        Ok(Self { documents, index, embedder, llm, top_k: config.top_k })
    }

    /// Answer one question: embed → retrieve → synthesize → recover source
    /// metadata. Each external call is attempted exactly once.
    pub async fn answer(&self, question: &str) -> Result<Answer, AnswerError> {
        let query_vector = self.embedder.embed(question).await?;
        let results = self.index.search(&query_vector, self.top_k)?;
        debug!(result_count = results.len(), "retrieved context");

        let prompt = build_prompt(question, &results);
        let answer = self.llm.generate(&prompt).await?;

        let metadata = self.recover_metadata(results.first());
        info!(result_count = results.len(), answer_len = answer.len(), "answered question");

        Ok(Answer { answer, metadata })
    }

    /// Best-effort source attribution: the first document whose content
    /// contains the top retrieved chunk's text verbatim.
    ///
    /// This is a heuristic, not a guarantee: it returns an empty map when
    /// nothing was retrieved or no document matches, and never fails. The
    /// chunkers keep chunk text a verbatim substring of its source, so in
    /// practice a retrieved chunk always finds its document.
    fn recover_metadata(&self, top: Option<&SearchResult>) -> Metadata {
        let Some(top) = top else {
            return Metadata::new();
        };
        debug!(
            doc_index = top.chunk.doc_index,
            score = top.score,
            "recovering metadata for top chunk"
        );
        self.documents
            .iter()
            .find(|doc| doc.content.contains(&top.chunk.text))
            .map(|doc| doc.metadata.clone())
            .unwrap_or_default()
    }
}

/// Concatenate the retrieved context (nearest first), then the question.
fn build_prompt(question: &str, context: &[SearchResult]) -> String {
    let mut prompt = String::from(
        "Answer the question using only the context below. \
         If the context does not contain the answer, say so.\n\n",
    );
    for result in context {
        prompt.push_str(&result.chunk.text);
        prompt.push_str("\n\n");
    }
    prompt.push_str("Question: ");
    prompt.push_str(question);
    prompt
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use askd_model::MockLlm;
    use askd_rag::{Chunk, HashEmbedder};

    use super::*;

    fn write_corpus(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write corpus");
        file
    }

    async fn ready_service(corpus: &str, llm: MockLlm) -> QueryService {
        let file = write_corpus(corpus);
        QueryService::initialize(
            file.path(),
            RagConfig::default(),
            Arc::new(HashEmbedder::default()),
            Arc::new(llm),
        )
        .await
        .expect("service initializes")
    }

    fn result(text: &str, doc_index: usize) -> SearchResult {
        SearchResult {
            chunk: Chunk { text: text.to_string(), doc_index, chunk_index: 0 },
            score: 1.0,
        }
    }

    #[test]
    fn prompt_keeps_context_order_and_ends_with_question() {
        let prompt =
            build_prompt("where?", &[result("nearest", 0), result("second", 1)]);

        let nearest = prompt.find("nearest").unwrap();
        let second = prompt.find("second").unwrap();
        let question = prompt.find("Question: where?").unwrap();
        assert!(nearest < second);
        assert!(second < question);
        assert!(prompt.ends_with("Question: where?"));
    }

    #[tokio::test]
    async fn answers_with_source_metadata() {
        let service = ready_service(
            r#"[{"content": "Paris is the capital of France.", "topic": "geography"}]"#,
            MockLlm::echo(),
        )
        .await;

        let answer = service.answer("capital of France").await.unwrap();

        assert!(answer.answer.contains("Paris"));
        assert_eq!(answer.metadata["topic"], "geography");
    }

    #[tokio::test]
    async fn empty_corpus_answers_with_empty_metadata() {
        let service = ready_service("[]", MockLlm::fixed("no idea")).await;

        let answer = service.answer("anything").await.unwrap();

        assert_eq!(answer.answer, "no idea");
        assert!(answer.metadata.is_empty());
    }

    #[tokio::test]
    async fn synthesis_failure_propagates() {
        let service = ready_service(
            r#"[{"content": "Some knowledge."}]"#,
            MockLlm::failing("simulated timeout"),
        )
        .await;

        let err = service.answer("question").await.unwrap_err();
        assert!(matches!(err, AnswerError::Synthesis(_)));
    }

    #[tokio::test]
    async fn state_rejects_empty_question_before_availability() {
        let state = ServiceState::Unavailable { reason: "corpus missing".into() };

        assert!(matches!(state.answer("").await.unwrap_err(), AnswerError::EmptyQuery));
        assert!(matches!(state.answer("   ").await.unwrap_err(), AnswerError::EmptyQuery));
        assert!(matches!(state.answer("real question").await.unwrap_err(), AnswerError::Unavailable(_)));
    }

    #[tokio::test]
    async fn initialize_fails_on_missing_corpus() {
        let err = QueryService::initialize(
            "/nonexistent/kb.json",
            RagConfig::default(),
            Arc::new(HashEmbedder::default()),
            Arc::new(MockLlm::fixed("unused")),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RagError::Load { .. }));
    }
}
