use std::sync::Arc;

use tracing::debug;

use super::{
    CandidatePool, LexicalRetriever, RetrievalError, Retriever, SemanticRetriever,
};
use crate::chunking::Chunk;
use crate::constants::DEFAULT_RETRIEVAL_TOP_K;
use crate::embedding::Embedder;

/// Queries each channel for `top_k` chunks and pools the results in channel order.
pub struct EnsembleRetriever {
    channels: Vec<Box<dyn Retriever>>,
    top_k: usize,
}

impl std::fmt::Debug for EnsembleRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsembleRetriever")
            .field(
                "channels",
                &self.channels.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl EnsembleRetriever {
    pub fn new(top_k: usize) -> Self {
        Self {
            channels: Vec::new(),
            top_k,
        }
    }

    /// Lexical then semantic, each contributing up to `top_k` chunks.
    pub fn hybrid(
        chunks: &[Chunk],
        embedder: Arc<dyn Embedder>,
        top_k: usize,
    ) -> Result<Self, RetrievalError> {
        let lexical = LexicalRetriever::new(chunks);
        let semantic = SemanticRetriever::build(chunks, embedder)?;

        Ok(Self::new(top_k).with_channel(lexical).with_channel(semantic))
    }

    pub fn with_channel(mut self, channel: impl Retriever + 'static) -> Self {
        self.channels.push(Box::new(channel));
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Up to `top_k * channels` unique chunk texts for `query`.
    pub fn candidates(&self, query: &str) -> Result<CandidatePool, RetrievalError> {
        let mut pool = CandidatePool::new();

        for channel in &self.channels {
            let hits = channel.query(query, self.top_k)?;
            debug!(channel = channel.name(), hits = hits.len(), "Retrieved");
            pool.extend(hits);
        }

        Ok(pool)
    }
}

impl Default for EnsembleRetriever {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIEVAL_TOP_K)
    }
}
