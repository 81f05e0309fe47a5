//! Model-backed collaborators used by retrieval and ranking.
//!
//! - [`Embedder`] turns text into a fixed-length vector ([`sentence`] provides the MiniLM
//!   implementation).
//! - [`RelevanceScorer`] scores a `(query, candidate)` pair ([`reranker`] provides the
//!   cross-encoder implementation).
//!
//! Both load real weights when a model directory is configured and fall back to a
//! deterministic stub otherwise, so the pipeline can run without model files.

/// BERT cross-encoder head used by the reranker.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Cross-encoder reranker.
pub mod reranker;
/// Sentence embedder (mean-pooled BERT).
pub mod sentence;
/// Tokenizer/model loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use reranker::{Reranker, RerankerConfig, RerankerError};
pub use sentence::{SentenceConfig, SentenceEmbedder};

use half::f16;

/// Produces a vector for a piece of text. Must be deterministic for identical input.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f16>, EmbeddingError>;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f16>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embedding_dim(&self) -> usize;

    /// `true` when running without model weights.
    fn is_stub(&self) -> bool {
        false
    }
}

/// Scores how relevant `candidate` is to `query`; higher is more relevant.
///
/// Scores are only comparable between candidates of the same query.
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, query: &str, candidate: &str) -> Result<f32, RerankerError>;

    /// `true` when running without model weights.
    fn is_stub(&self) -> bool {
        false
    }
}
