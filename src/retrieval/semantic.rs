use std::sync::Arc;

use half::f16;
use tracing::{debug, instrument};

use super::{RetrievalError, RetrievedChunk, Retriever, top_k_by_score};
use crate::chunking::Chunk;
use crate::embedding::Embedder;

/// Embedding-similarity retriever. Chunks are embedded once, at build time.
pub struct SemanticRetriever {
    texts: Vec<Arc<str>>,
    embeddings: Vec<Vec<f16>>,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for SemanticRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticRetriever")
            .field("chunks", &self.texts.len())
            .field("embedding_dim", &self.embedder.embedding_dim())
            .field("stub", &self.embedder.is_stub())
            .finish()
    }
}

impl SemanticRetriever {
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    pub fn build(chunks: &[Chunk], embedder: Arc<dyn Embedder>) -> Result<Self, RetrievalError> {
        let texts: Vec<Arc<str>> = chunks.iter().map(|c| Arc::from(c.text.as_str())).collect();
        let refs: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&refs)?;

        let expected = embedder.embedding_dim();
        if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
            return Err(RetrievalError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }

        debug!(embedding_dim = expected, "Built semantic index");

        Ok(Self {
            texts,
            embeddings,
            embedder,
        })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl Retriever for SemanticRetriever {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn query(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        if self.texts.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query)?;
        if query_embedding.len() != self.embedder.embedding_dim() {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.embedder.embedding_dim(),
                actual: query_embedding.len(),
            });
        }

        let scores = self
            .embeddings
            .iter()
            .map(|e| cosine_similarity_f16(&query_embedding, e));

        Ok(top_k_by_score(&self.texts, scores, k))
    }
}

/// Cosine similarity; zero when the lengths differ or either vector is zero.
#[inline]
pub fn cosine_similarity_f16(a: &[f16], b: &[f16]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b)
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (av, bv)| {
                let av = av.to_f32();
                let bv = bv.to_f32();
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm = norm_a_sq.sqrt() * norm_b_sq.sqrt();
    if norm == 0.0 { 0.0 } else { dot / norm }
}
