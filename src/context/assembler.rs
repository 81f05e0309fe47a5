use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use crate::analysis::{Checklist, Concern};
use crate::chunking::{Chunk, Chunker};
use crate::embedding::Embedder;
use crate::ranking::CandidateRanker;
use crate::retrieval::EnsembleRetriever;

use super::error::AssemblyError;
use super::set::{ConcernContext, ContextSet};

/// Chunks a document, builds the retrieval indices once, then retrieves and reranks every
/// concern on the blocking pool. The union waits for all concerns.
pub struct ContextAssembler {
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    ranker: Arc<CandidateRanker>,
    top_k: usize,
}

impl std::fmt::Debug for ContextAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextAssembler")
            .field("chunker", &self.chunker)
            .field("ranker", &self.ranker)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl ContextAssembler {
    pub fn new(
        chunker: Chunker,
        embedder: Arc<dyn Embedder>,
        ranker: CandidateRanker,
        top_k: usize,
    ) -> Self {
        Self {
            chunker,
            embedder,
            ranker: Arc::new(ranker),
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn top_n(&self) -> usize {
        self.ranker.top_n()
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn ranker(&self) -> &CandidateRanker {
        &self.ranker
    }

    #[instrument(skip_all, fields(text_len = text.len(), concerns = checklist.len()))]
    pub async fn assemble(
        &self,
        text: Arc<str>,
        checklist: &Checklist,
    ) -> Result<ContextSet, AssemblyError> {
        let per_concern = self.assemble_per_concern(text, checklist).await?;
        let context = ContextSet::union(&per_concern);

        debug!(chunks = context.len(), "Context assembled");
        Ok(context)
    }

    /// Winners for each concern, in checklist order.
    pub async fn assemble_per_concern(
        &self,
        text: Arc<str>,
        checklist: &Checklist,
    ) -> Result<Vec<ConcernContext>, AssemblyError> {
        let chunker = self.chunker;
        let embedder = Arc::clone(&self.embedder);
        let top_k = self.top_k;

        let retriever = tokio::task::spawn_blocking(move || {
            let chunks: Vec<Chunk> = chunker.split(&text).collect();
            debug!(chunks = chunks.len(), "Document chunked");
            EnsembleRetriever::hybrid(&chunks, embedder, top_k)
        })
        .await??;
        let retriever = Arc::new(retriever);

        let workers = checklist.iter().cloned().map(|concern| {
            let retriever = Arc::clone(&retriever);
            let ranker = Arc::clone(&self.ranker);
            tokio::task::spawn_blocking(move || rank_concern(&retriever, &ranker, concern))
        });

        try_join_all(workers)
            .await?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
    }
}

fn rank_concern(
    retriever: &EnsembleRetriever,
    ranker: &CandidateRanker,
    concern: Concern,
) -> Result<ConcernContext, AssemblyError> {
    let pool = retriever.candidates(concern.as_str())?;
    let candidates = ranker.rerank_top_n(concern.as_str(), &pool)?;

    debug!(
        concern = %concern,
        pooled = pool.len(),
        kept = candidates.len(),
        "Concern ranked"
    );

    Ok(ConcernContext {
        concern,
        candidates,
    })
}
