use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error, instrument};

use super::Generator;
use super::error::GenerationError;
use crate::constants::DEFAULT_GENERATOR_MODEL;

/// Hosted model reached through `genai`. Credentials come from the provider's usual
/// environment variables.
#[derive(Clone)]
pub struct GenaiGenerator {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl std::fmt::Debug for GenaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiGenerator")
            .field("model", &self.model)
            .finish()
    }
}

impl GenaiGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default().with_temperature(0.0),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for GenaiGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATOR_MODEL)
    }
}

#[async_trait]
impl Generator for GenaiGenerator {
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await
            .map_err(|e| {
                error!("Provider error: {}", e);
                GenerationError::Provider {
                    reason: e.to_string(),
                }
            })?;

        let text = response
            .first_text()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyResponse)?;

        debug!(response_len = text.len(), "Provider responded");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
