use thiserror::Error;

use crate::context::AssemblyError;
use crate::generation::GenerationError;

/// Why an analysis failed. Deliberately untyped for callers.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct AnalysisError {
    pub reason: String,
}

impl AnalysisError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<AssemblyError> for AnalysisError {
    fn from(e: AssemblyError) -> Self {
        Self::new(format!("context assembly failed: {}", e))
    }
}

impl From<GenerationError> for AnalysisError {
    fn from(e: GenerationError) -> Self {
        Self::new(format!("generation failed: {}", e))
    }
}
