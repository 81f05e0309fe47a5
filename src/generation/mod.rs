//! Generative collaborator: prompt construction, provider call and verdict parsing.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod offline;
pub mod parse;
pub mod prompt;
pub mod provider;


pub use error::GenerationError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerator;
pub use offline::OfflineGenerator;
pub use parse::{parse_verdicts, strip_code_fences};
pub use prompt::build_prompt;
pub use provider::GenaiGenerator;

use async_trait::async_trait;

/// Turns a prompt into raw text. Called at most once per analysis, never retried.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model or backend name for logs.
    fn name(&self) -> &str;

    fn is_offline(&self) -> bool {
        false
    }
}
