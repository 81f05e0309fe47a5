use thiserror::Error;

use crate::embedding::RerankerError;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("reranker error: {0}")]
    Reranker(#[from] RerankerError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}
