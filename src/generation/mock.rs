use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::Generator;
use super::error::GenerationError;

enum MockReply {
    Text(String),
    Fail(String),
}

/// Scripted generator that counts calls and remembers the last prompt.
#[derive(Clone)]
pub struct MockGenerator {
    reply: Arc<Mutex<MockReply>>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockGenerator {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply: Arc::new(Mutex::new(reply)),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(text.into()))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fail(reason.into()))
    }

    /// Sleeps before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_reply(&self, text: impl Into<String>) {
        *self.reply.lock() = MockReply::Text(text.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &*self.reply.lock() {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(reason) => Err(GenerationError::Provider {
                reason: reason.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
