use std::time::Duration;

use crate::chunking::ChunkerConfig;
use crate::config::ConfigError;
use crate::config::env::parse_number;
use crate::constants::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_GENERATION_TIMEOUT_SECS,
    DEFAULT_RERANK_TOP_N, DEFAULT_RETRIEVAL_TOP_K, MIN_TEXT_LEN,
};

/// Tuning for one [`AnalysisPipeline`](super::AnalysisPipeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Target chunk length, in characters. Default: `1500`.
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks. Default: `200`.
    pub chunk_overlap: usize,
    /// Chunks per retrieval channel per concern. Default: `5`.
    pub retrieval_top_k: usize,
    /// Reranked chunks kept per concern. Default: `2`.
    pub rerank_top_n: usize,
    /// Shorter documents (in characters) get the degenerate result. Default: `200`.
    pub min_text_len: usize,
    /// Upper bound on the generation call. Default: 60s.
    pub generation_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            retrieval_top_k: DEFAULT_RETRIEVAL_TOP_K,
            rerank_top_n: DEFAULT_RERANK_TOP_N,
            min_text_len: MIN_TEXT_LEN,
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }
}

impl PipelineConfig {
    const ENV_CHUNK_SIZE: &'static str = "CLAUSEWATCH_CHUNK_SIZE";
    const ENV_CHUNK_OVERLAP: &'static str = "CLAUSEWATCH_CHUNK_OVERLAP";
    const ENV_RETRIEVAL_TOP_K: &'static str = "CLAUSEWATCH_RETRIEVAL_TOP_K";
    const ENV_RERANK_TOP_N: &'static str = "CLAUSEWATCH_RERANK_TOP_N";
    const ENV_MIN_TEXT_LEN: &'static str = "CLAUSEWATCH_MIN_TEXT_LEN";
    const ENV_GENERATION_TIMEOUT_SECS: &'static str = "CLAUSEWATCH_GENERATION_TIMEOUT_SECS";

    /// Reads `CLAUSEWATCH_*` overrides and validates the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            chunk_size: parse_number(Self::ENV_CHUNK_SIZE, defaults.chunk_size)?,
            chunk_overlap: parse_number(Self::ENV_CHUNK_OVERLAP, defaults.chunk_overlap)?,
            retrieval_top_k: parse_number(Self::ENV_RETRIEVAL_TOP_K, defaults.retrieval_top_k)?,
            rerank_top_n: parse_number(Self::ENV_RERANK_TOP_N, defaults.rerank_top_n)?,
            min_text_len: parse_number(Self::ENV_MIN_TEXT_LEN, defaults.min_text_len)?,
            generation_timeout: Duration::from_secs(parse_number(
                Self::ENV_GENERATION_TIMEOUT_SECS,
                defaults.generation_timeout.as_secs(),
            )?),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            (Self::ENV_CHUNK_SIZE, self.chunk_size),
            (Self::ENV_RETRIEVAL_TOP_K, self.retrieval_top_k),
            (Self::ENV_RERANK_TOP_N, self.rerank_top_n),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        if self.generation_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_GENERATION_TIMEOUT_SECS,
                reason: "must be at least 1".to_string(),
            });
        }

        self.chunker_config()
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                name: Self::ENV_CHUNK_OVERLAP,
                reason: e.to_string(),
            })
    }

    pub fn chunker_config(&self) -> ChunkerConfig {
        ChunkerConfig::new(self.chunk_size, self.chunk_overlap)
    }
}
