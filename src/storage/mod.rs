//! Durable key→value storage for analysis results.
//!
//! The store is unbounded: nothing is ever evicted from it. Bounded in-memory caching lives in
//! [`crate::cache`] in front of it.

pub mod disk;
pub mod error;
pub mod memory;
mod record;

pub use disk::DiskResultStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryResultStore;
pub use record::CacheRecord;

use std::sync::Arc;

use crate::hashing::ContentHash;

/// Point lookup and upsert by content hash. Implementations must tolerate concurrent upserts
/// of the same key (last writer wins).
pub trait ResultStore: Send + Sync + 'static {
    fn load(&self, hash: &ContentHash) -> StoreResult<Option<CacheRecord>>;

    /// Inserts or replaces the record for `record.content_hash`.
    fn upsert(&self, record: &CacheRecord) -> StoreResult<()>;
}

impl<S: ResultStore + ?Sized> ResultStore for Arc<S> {
    fn load(&self, hash: &ContentHash) -> StoreResult<Option<CacheRecord>> {
        (**self).load(hash)
    }

    fn upsert(&self, record: &CacheRecord) -> StoreResult<()> {
        (**self).upsert(record)
    }
}
