use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::error::EmbeddingError;

#[derive(Debug, Error)]
pub enum RerankerError {
    #[error("cross-encoder directory not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("could not load cross-encoder: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("pair scoring failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("could not tokenize pair: {reason}")]
    TokenizationFailed { reason: String },

    #[error("bad reranker config: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for RerankerError {
    fn from(err: candle_core::Error) -> Self {
        Self::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

/// The loading helpers are shared with the embedder and report [`EmbeddingError`].
impl From<EmbeddingError> for RerankerError {
    fn from(err: EmbeddingError) -> Self {
        use EmbeddingError as E;
        match err {
            E::ModelNotFound { path } => Self::ModelNotFound { path },
            E::TokenizationFailed { reason } => Self::TokenizationFailed { reason },
            E::InvalidConfig { reason } => Self::InvalidConfig { reason },
            E::ModelLoadFailed { reason } => Self::ModelLoadFailed { reason },
            E::InferenceFailed { reason } => Self::InferenceFailed { reason },
        }
    }
}
