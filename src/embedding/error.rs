use std::path::PathBuf;
use thiserror::Error;

/// Failures of the sentence embedder and of the model-loading helpers it shares with the
/// reranker.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("model directory not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("could not load sentence model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("sentence embedding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("could not tokenize text: {reason}")]
    TokenizationFailed { reason: String },

    #[error("bad sentence embedder config: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        Self::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        Self::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
