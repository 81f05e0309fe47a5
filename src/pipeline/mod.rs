//! The `analyze` operation.
//!
//! Order of work for one document:
//!
//! 1. Documents shorter than `min_text_len` characters get [`AnalysisResult::too_short`]
//!    without touching the cache or any collaborator.
//! 2. Cache lookup by content hash. A hit is returned as stored.
//! 3. [`ContextAssembler`] chunks, retrieves, reranks and unions the context.
//! 4. One generation call under a timeout, no retries.
//! 5. Verdicts are parsed and scored, then written back to the cache. Nothing is written
//!    unless every step succeeded.
//!
//! Concurrent misses on the same text are not coalesced; both run and the later write wins.

pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::AnalysisError;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::analysis::{AnalysisResult, Checklist};
use crate::cache::AnalysisCache;
use crate::chunking::Chunker;
use crate::config::ConfigError;
use crate::context::ContextAssembler;
use crate::embedding::{Embedder, RelevanceScorer, Reranker, SentenceEmbedder};
use crate::generation::{
    GenerationError, Generator, OfflineGenerator, build_prompt, parse_verdicts,
};
use crate::hashing::ContentHash;
use crate::ranking::CandidateRanker;
use crate::storage::ResultStore;

/// The external collaborators a pipeline calls.
#[derive(Clone)]
pub struct Collaborators {
    pub embedder: Arc<dyn Embedder>,
    pub scorer: Arc<dyn RelevanceScorer>,
    pub generator: Arc<dyn Generator>,
}

impl Collaborators {
    /// Stub embedder, stub reranker and the offline generator for `checklist`.
    pub fn offline(checklist: &Checklist) -> Result<Self, ConfigError> {
        let scorer = Reranker::stub().map_err(|e| ConfigError::InvalidValue {
            name: "reranker",
            reason: e.to_string(),
        })?;

        Ok(Self {
            embedder: Arc::new(SentenceEmbedder::stub()),
            scorer: Arc::new(scorer),
            generator: Arc::new(OfflineGenerator::new(checklist.clone())),
        })
    }
}

/// Which backend each collaborator is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaboratorModes {
    pub embedder: &'static str,
    pub reranker: &'static str,
    pub generator: String,
}

pub struct AnalysisPipeline<S> {
    config: PipelineConfig,
    checklist: Checklist,
    assembler: ContextAssembler,
    generator: Arc<dyn Generator>,
    cache: AnalysisCache<S>,
}

impl<S> std::fmt::Debug for AnalysisPipeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("config", &self.config)
            .field("concerns", &self.checklist.len())
            .field("assembler", &self.assembler)
            .field("generator", &self.generator.name())
            .field("cache", &self.cache)
            .finish()
    }
}

impl<S: ResultStore> AnalysisPipeline<S> {
    pub fn new(
        config: PipelineConfig,
        checklist: Checklist,
        collaborators: Collaborators,
        cache: AnalysisCache<S>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let chunker =
            Chunker::new(config.chunker_config()).map_err(|e| ConfigError::InvalidValue {
                name: "chunker",
                reason: e.to_string(),
            })?;
        let ranker = CandidateRanker::new(collaborators.scorer, config.rerank_top_n).map_err(
            |e| ConfigError::InvalidValue {
                name: "ranker",
                reason: e.to_string(),
            },
        )?;
        let assembler = ContextAssembler::new(
            chunker,
            collaborators.embedder,
            ranker,
            config.retrieval_top_k,
        );

        Ok(Self {
            config,
            checklist,
            assembler,
            generator: collaborators.generator,
            cache,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn cache(&self) -> &AnalysisCache<S> {
        &self.cache
    }

    pub fn modes(&self) -> CollaboratorModes {
        let mode = |stub: bool| if stub { "stub" } else { "model" };
        CollaboratorModes {
            embedder: mode(self.assembler.embedder().is_stub()),
            reranker: mode(self.assembler.ranker().is_stub()),
            generator: self.generator.name().to_string(),
        }
    }

    /// Analyzes `text`. `source` is only logged.
    #[instrument(
        skip_all,
        fields(
            source = %source,
            text_len = text.len(),
            request_id = %uuid::Uuid::new_v4(),
        )
    )]
    pub async fn analyze(&self, source: &str, text: &str) -> Result<AnalysisResult, AnalysisError> {
        match self.run(text).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(error = %e, "Analysis failed");
                Err(e)
            }
        }
    }

    async fn run(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let char_len = text.chars().count();
        if char_len < self.config.min_text_len {
            info!(
                char_len,
                min_text_len = self.config.min_text_len,
                "Text too short"
            );
            return Ok(AnalysisResult::too_short());
        }

        let hash = ContentHash::of(text);
        if let Some((result, tier)) = self.cache.lookup_hash(hash).await {
            info!(tier = tier.as_str(), safety_score = result.safety_score, "Cache hit");
            return Ok(result);
        }

        let context = self
            .assembler
            .assemble(Arc::from(text), &self.checklist)
            .await?;
        let prompt = build_prompt(&self.checklist, &context);
        debug!(
            context_chunks = context.len(),
            prompt_len = prompt.len(),
            "Prompt built"
        );

        let raw = self.generate(&prompt).await?;
        let verdicts = parse_verdicts(&raw, &self.checklist)?;
        let result = AnalysisResult::from_verdicts(verdicts);

        self.cache.store_hash(hash, &result).await;

        info!(
            safety_score = result.safety_score,
            flagged = result.flagged_count(),
            "Analysis complete"
        );
        Ok(result)
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let timeout = self.config.generation_timeout;
        match tokio::time::timeout(timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout { timeout }),
        }
    }
}
