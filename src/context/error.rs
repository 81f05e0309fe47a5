use thiserror::Error;

use crate::ranking::RankingError;
use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("ranking failed: {0}")]
    Ranking(#[from] RankingError),

    #[error("context worker failed: {reason}")]
    Worker { reason: String },
}

impl From<tokio::task::JoinError> for AssemblyError {
    fn from(e: tokio::task::JoinError) -> Self {
        AssemblyError::Worker {
            reason: e.to_string(),
        }
    }
}
