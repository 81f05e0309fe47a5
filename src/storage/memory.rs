use std::collections::HashMap;

use parking_lot::RwLock;

use super::error::StoreResult;
use super::{CacheRecord, ResultStore};
use crate::hashing::ContentHash;

/// Process-local store. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    records: RwLock<HashMap<ContentHash, CacheRecord>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ResultStore for MemoryResultStore {
    fn load(&self, hash: &ContentHash) -> StoreResult<Option<CacheRecord>> {
        Ok(self.records.read().get(hash).cloned())
    }

    fn upsert(&self, record: &CacheRecord) -> StoreResult<()> {
        self.records.write().insert(record.hash(), record.clone());
        Ok(())
    }
}
