//! Content-addressed analysis cache.
//!
//! A bounded moka cache sits in front of a durable [`ResultStore`]. Lookups check memory, then
//! the store (on the blocking pool), and promote durable hits into memory. Store failures never
//! fail a request: a failed lookup is a miss and a failed write is logged and dropped.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, instrument, warn};

use crate::analysis::AnalysisResult;
use crate::hashing::ContentHash;
use crate::storage::{CacheRecord, ResultStore};

/// Default number of results held in memory.
pub const DEFAULT_MEMORY_CAPACITY: u64 = 10_000;

/// Where a cached result was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    Memory,
    Durable,
}

impl CacheTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTier::Memory => "memory",
            CacheTier::Durable => "durable",
        }
    }
}

pub struct AnalysisCache<S> {
    memory: Cache<ContentHash, Arc<AnalysisResult>>,
    store: Arc<S>,
}

impl<S> Clone for AnalysisCache<S> {
    fn clone(&self) -> Self {
        Self {
            memory: self.memory.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> std::fmt::Debug for AnalysisCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("memory_entries", &self.memory.entry_count())
            .finish()
    }
}

impl<S: ResultStore> AnalysisCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_MEMORY_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: u64) -> Self {
        Self {
            memory: Cache::builder().max_capacity(capacity).build(),
            store: Arc::new(store),
        }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn memory_entries(&self) -> u64 {
        self.memory.entry_count()
    }

    /// Runs pending moka maintenance so `memory_entries` is exact.
    pub fn run_pending_tasks(&self) {
        self.memory.run_pending_tasks();
    }

    pub async fn lookup(&self, text: &str) -> Option<AnalysisResult> {
        self.lookup_hash(ContentHash::of(text))
            .await
            .map(|(result, _)| result)
    }

    #[instrument(skip_all, fields(hash = %hash))]
    pub async fn lookup_hash(&self, hash: ContentHash) -> Option<(AnalysisResult, CacheTier)> {
        if let Some(result) = self.memory.get(&hash) {
            debug!("Memory hit");
            return Some(((*result).clone(), CacheTier::Memory));
        }

        let store = Arc::clone(&self.store);
        let loaded = match tokio::task::spawn_blocking(move || store.load(&hash)).await {
            Ok(Ok(record)) => record?,
            Ok(Err(e)) => {
                warn!(error = %e, "Cache store lookup failed, treating as miss");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Cache lookup task failed, treating as miss");
                return None;
            }
        };

        let result: AnalysisResult = match serde_json::from_str(&loaded.result_json) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Stored result is not valid JSON, treating as miss");
                return None;
            }
        };

        debug!(created_at = loaded.created_at, "Durable hit");
        self.memory.insert(hash, Arc::new(result.clone()));
        Some((result, CacheTier::Durable))
    }

    pub async fn store(&self, text: &str, result: &AnalysisResult) -> bool {
        self.store_hash(ContentHash::of(text), result).await
    }

    /// Upserts `result`. Returns whether it reached the durable store; failures are logged.
    #[instrument(skip_all, fields(hash = %hash))]
    pub async fn store_hash(&self, hash: ContentHash, result: &AnalysisResult) -> bool {
        let json = match serde_json::to_string(result) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize result, not caching");
                return false;
            }
        };

        let record = CacheRecord::new(hash, json);
        let store = Arc::clone(&self.store);

        match tokio::task::spawn_blocking(move || store.upsert(&record)).await {
            Ok(Ok(())) => {
                self.memory.insert(hash, Arc::new(result.clone()));
                debug!("Stored result");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Cache store write failed, result not persisted");
                false
            }
            Err(e) => {
                warn!(error = %e, "Cache store task failed, result not persisted");
                false
            }
        }
    }
}
