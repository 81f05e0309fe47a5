use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use super::Generator;
use super::error::GenerationError;
use crate::analysis::Checklist;

/// Answers `"NO"` to every concern without calling a provider. Used for local runs without
/// credentials.
#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator {
    checklist: Checklist,
}

impl OfflineGenerator {
    pub fn new(checklist: Checklist) -> Self {
        Self { checklist }
    }
}

#[async_trait]
impl Generator for OfflineGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let answers: Map<String, Value> = self
            .checklist
            .iter()
            .map(|c| (c.to_string(), Value::String("NO".to_string())))
            .collect();

        debug!(prompt_len = prompt.len(), "Offline generator answered");

        serde_json::to_string(&answers).map_err(|e| GenerationError::Provider {
            reason: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        "offline"
    }

    fn is_offline(&self) -> bool {
        true
    }
}
