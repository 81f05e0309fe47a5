//! Candidate retrieval over one document's chunks.
//!
//! Both channels are built once per document and are read-only afterwards, so a single
//! [`EnsembleRetriever`] can be shared across per-concern workers without locking.
//!
//! - [`LexicalRetriever`]: BM25 Okapi over lowercased terms.
//! - [`SemanticRetriever`]: cosine similarity between [`Embedder`](crate::embedding::Embedder)
//!   vectors.
//! - [`EnsembleRetriever`]: queries every channel in registration order and pools the results
//!   into a [`CandidatePool`], dropping exact-text duplicates.

pub mod ensemble;
pub mod error;
pub mod lexical;
pub mod pool;
pub mod semantic;

pub use ensemble::EnsembleRetriever;
pub use error::RetrievalError;
pub use lexical::{Bm25Params, LexicalRetriever};
pub use pool::CandidatePool;
pub use semantic::{SemanticRetriever, cosine_similarity_f16};

use std::cmp::Ordering;
use std::sync::Arc;

/// A chunk returned by one retrieval channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    /// Position of the chunk in the document.
    pub chunk_index: usize,
    pub text: Arc<str>,
    /// Channel-specific score; not comparable across channels.
    pub score: f32,
}

/// One retrieval channel.
pub trait Retriever: Send + Sync {
    /// Short channel name for logs.
    fn name(&self) -> &'static str;

    /// Returns at most `k` chunks, best first. Equal scores keep document order.
    ///
    /// Fewer than `k` chunks in the document is not an error.
    fn query(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError>;
}

/// Total descending order on scores. NaN ranks with negative infinity, below every real score.
pub(crate) fn by_score_desc(a: f32, b: f32) -> Ordering {
    let key = |s: f32| if s.is_nan() { f32::NEG_INFINITY } else { s };
    key(b).total_cmp(&key(a))
}

/// Sorts `(chunk_index, score)` pairs best first and keeps `k`.
///
/// The sort is stable and the input is in document order, so ties resolve to the earlier chunk.
pub(crate) fn top_k_by_score(
    texts: &[Arc<str>],
    scores: impl IntoIterator<Item = f32>,
    k: usize,
) -> Vec<RetrievedChunk> {
    let mut ranked: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| by_score_desc(a.1, b.1));
    ranked.truncate(k);

    ranked
        .into_iter()
        .map(|(chunk_index, score)| RetrievedChunk {
            chunk_index,
            text: Arc::clone(&texts[chunk_index]),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<Arc<str>> {
        items.iter().map(|t| Arc::from(*t)).collect()
    }

    #[test]
    fn test_top_k_orders_descending() {
        let texts = texts(&["a", "b", "c"]);
        let ranked = top_k_by_score(&texts, [0.1, 0.9, 0.5], 3);

        let order: Vec<_> = ranked.iter().map(|r| r.chunk_index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(&*ranked[0].text, "b");
    }

    #[test]
    fn test_top_k_ties_keep_document_order() {
        let texts = texts(&["a", "b", "c", "d"]);
        let ranked = top_k_by_score(&texts, [0.5, 0.7, 0.5, 0.5], 3);

        let order: Vec<_> = ranked.iter().map(|r| r.chunk_index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_top_k_shortfall() {
        let texts = texts(&["only"]);
        assert_eq!(top_k_by_score(&texts, [1.0], 5).len(), 1);
        assert!(top_k_by_score(&[], std::iter::empty(), 5).is_empty());
    }

    #[test]
    fn test_top_k_nan_scores_rank_last() {
        let items: Vec<String> = (0..40).map(|i| format!("chunk {i}")).collect();
        let texts = texts(&items.iter().map(String::as_str).collect::<Vec<_>>());
        let scores = (0..40).map(|i| if i % 3 == 0 { f32::NAN } else { i as f32 });

        let ranked = top_k_by_score(&texts, scores, 40);

        assert_eq!(ranked.len(), 40);
        assert_eq!(ranked[0].chunk_index, 38);
        assert!(ranked.iter().skip(26).all(|r| r.score.is_nan()));
        assert_eq!(ranked[26].chunk_index, 0);
    }

    #[test]
    fn test_top_k_zero() {
        let texts = texts(&["a", "b"]);
        assert!(top_k_by_score(&texts, [1.0, 2.0], 0).is_empty());
    }
}
