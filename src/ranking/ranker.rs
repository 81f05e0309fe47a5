use std::sync::Arc;

use tracing::debug;

use crate::constants::DEFAULT_RERANK_TOP_N;
use crate::embedding::RelevanceScorer;
use crate::retrieval::{CandidatePool, by_score_desc};

use super::error::RankingError;
use super::types::RankedCandidate;

pub struct CandidateRanker {
    scorer: Arc<dyn RelevanceScorer>,
    top_n: usize,
}

impl std::fmt::Debug for CandidateRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateRanker")
            .field("top_n", &self.top_n)
            .field("stub", &self.scorer.is_stub())
            .finish()
    }
}

impl CandidateRanker {
    pub fn new(scorer: Arc<dyn RelevanceScorer>, top_n: usize) -> Result<Self, RankingError> {
        if top_n == 0 {
            return Err(RankingError::InvalidInput {
                reason: "top_n must be at least 1".to_string(),
            });
        }
        Ok(Self { scorer, top_n })
    }

    pub fn with_default_top_n(scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self {
            scorer,
            top_n: DEFAULT_RERANK_TOP_N,
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn is_stub(&self) -> bool {
        self.scorer.is_stub()
    }

    /// Scores every candidate in pool order.
    pub fn score_candidates(
        &self,
        query: &str,
        pool: &CandidatePool,
    ) -> Result<Vec<RankedCandidate>, RankingError> {
        pool.texts()
            .iter()
            .enumerate()
            .map(|(position, text)| {
                let score = self.scorer.score(query, text)?;
                Ok(RankedCandidate::new(Arc::clone(text), score, position))
            })
            .collect()
    }

    /// Best `top_n` candidates, highest score first.
    pub fn rerank_top_n(
        &self,
        query: &str,
        pool: &CandidatePool,
    ) -> Result<Vec<RankedCandidate>, RankingError> {
        if pool.is_empty() {
            debug!("No candidates to rank");
            return Ok(Vec::new());
        }

        let mut scored = self.score_candidates(query, pool)?;

        scored.sort_by(|a, b| by_score_desc(a.score, b.score));
        scored.truncate(self.top_n);

        debug!(
            query_len = query.len(),
            pool_size = pool.len(),
            kept = scored.len(),
            top_score = scored.first().map(|c| c.score),
            "Ranked candidates"
        );

        Ok(scored)
    }
}
