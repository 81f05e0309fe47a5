//! Collaborators that count how often the pipeline calls them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clausewatch::analysis::Checklist;
use clausewatch::embedding::{
    Embedder, EmbeddingError, RelevanceScorer, Reranker, RerankerError, SentenceEmbedder,
};
use clausewatch::generation::MockGenerator;
use clausewatch::hashing::ContentHash;
use clausewatch::pipeline::Collaborators;
use clausewatch::storage::{CacheRecord, ResultStore, StoreError, StoreResult};
use half::f16;

/// Stub sentence embedder that counts texts embedded.
pub struct CountingEmbedder {
    inner: SentenceEmbedder,
    calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn new() -> Self {
        Self {
            inner: SentenceEmbedder::stub(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f16>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }

    fn is_stub(&self) -> bool {
        true
    }
}

/// Stub reranker that counts scored pairs.
pub struct CountingScorer {
    inner: Reranker,
    calls: AtomicUsize,
}

impl CountingScorer {
    pub fn new() -> Self {
        Self {
            inner: Reranker::stub().expect("stub reranker"),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RelevanceScorer for CountingScorer {
    fn score(&self, query: &str, candidate: &str) -> Result<f32, RerankerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.score(query, candidate)
    }

    fn is_stub(&self) -> bool {
        true
    }
}

/// Store whose every operation fails.
#[derive(Default)]
pub struct FailingStore {
    pub writes: AtomicUsize,
}

impl ResultStore for FailingStore {
    fn load(&self, _hash: &ContentHash) -> StoreResult<Option<CacheRecord>> {
        Err(StoreError::Io(std::io::Error::other("store offline")))
    }

    fn upsert(&self, _record: &CacheRecord) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io(std::io::Error::other("store offline")))
    }
}

/// Handles to the counting collaborators wired into a pipeline.
#[derive(Clone)]
pub struct Counters {
    pub embedder: Arc<CountingEmbedder>,
    pub scorer: Arc<CountingScorer>,
    pub generator: MockGenerator,
}

impl Counters {
    pub fn new(generator: MockGenerator) -> Self {
        Self {
            embedder: Arc::new(CountingEmbedder::new()),
            scorer: Arc::new(CountingScorer::new()),
            generator,
        }
    }

    /// Replies with a verdict for every concern in `checklist`, flagging the listed indices.
    pub fn answering(checklist: &Checklist, flagged: &[usize]) -> Self {
        Self::new(MockGenerator::replying(super::fixtures::verdicts_json(
            checklist, flagged,
        )))
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            embedder: self.embedder.clone(),
            scorer: self.scorer.clone(),
            generator: Arc::new(self.generator.clone()),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.embedder.calls() + self.scorer.calls() + self.generator.calls()
    }
}
