use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider error: {reason}")]
    Provider { reason: String },

    #[error("generation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("generator returned no text")]
    EmptyResponse,

    #[error("generator output is not a JSON object: {reason}")]
    Parse { reason: String },

    #[error("generator output is missing {} concern(s): {}", missing.len(), missing.join(" | "))]
    MissingConcerns { missing: Vec<String> },

    #[error("verdict for \"{concern}\" is not a string")]
    InvalidVerdict { concern: String },
}

impl GenerationError {
    /// Whether the collaborator itself failed, as opposed to returning unusable output.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            GenerationError::Provider { .. } | GenerationError::Timeout { .. }
        )
    }
}
