use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::storage::{DiskResultStore, MemoryResultStore, StoreError, StoreResult};

fn result(score_flags: usize) -> AnalysisResult {
    let mut verdicts = BTreeMap::new();
    for i in 0..3 {
        let verdict = if i < score_flags { "YES. bad" } else { "NO" };
        verdicts.insert(format!("Q{i}?"), verdict.to_string());
    }
    AnalysisResult::from_verdicts(verdicts)
}

#[derive(Default)]
struct BrokenStore {
    loads: AtomicUsize,
}

impl ResultStore for BrokenStore {
    fn load(&self, _hash: &ContentHash) -> StoreResult<Option<CacheRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io(std::io::Error::other("disk gone")))
    }

    fn upsert(&self, _record: &CacheRecord) -> StoreResult<()> {
        Err(StoreError::Io(std::io::Error::other("disk gone")))
    }
}

#[tokio::test]
async fn test_miss_then_hit() {
    let cache = AnalysisCache::new(MemoryResultStore::new());
    let text = "some policy text";

    assert!(cache.lookup(text).await.is_none());
    assert!(cache.store(text, &result(1)).await);
    assert_eq!(cache.lookup(text).await, Some(result(1)));
}

#[tokio::test]
async fn test_key_is_text_only() {
    let cache = AnalysisCache::new(MemoryResultStore::new());
    cache.store("identical", &result(0)).await;

    assert!(cache.lookup("identical").await.is_some());
    assert!(cache.lookup("identical ").await.is_none());
}

#[tokio::test]
async fn test_store_overwrites() {
    let cache = AnalysisCache::new(MemoryResultStore::new());
    cache.store("doc", &result(0)).await;
    cache.store("doc", &result(2)).await;

    assert_eq!(cache.lookup("doc").await, Some(result(2)));
    assert_eq!(cache.backend().len(), 1);
}

#[tokio::test]
async fn test_durable_hit_is_promoted_to_memory() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = DiskResultStore::open(dir.path().to_path_buf()).unwrap();

    let writer = AnalysisCache::new(store.clone());
    writer.store("doc", &result(1)).await;

    let reader = AnalysisCache::new(store);
    let hash = ContentHash::of("doc");

    let (found, tier) = reader.lookup_hash(hash).await.unwrap();
    assert_eq!(found, result(1));
    assert_eq!(tier, CacheTier::Durable);

    let (_, tier) = reader.lookup_hash(hash).await.unwrap();
    assert_eq!(tier, CacheTier::Memory);
}

#[tokio::test]
async fn test_lookup_failure_is_a_miss() {
    let cache = AnalysisCache::new(BrokenStore::default());

    assert!(cache.lookup("doc").await.is_none());
    assert_eq!(cache.backend().loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_write_failure_is_swallowed() {
    let cache = AnalysisCache::new(BrokenStore::default());

    assert!(!cache.store("doc", &result(0)).await);
    cache.run_pending_tasks();
    assert_eq!(cache.memory_entries(), 0);
}

#[tokio::test]
async fn test_unparseable_record_is_a_miss() {
    let store = MemoryResultStore::new();
    let hash = ContentHash::of("doc");
    store
        .upsert(&CacheRecord::new(hash, "not json".to_string()))
        .unwrap();

    let cache = AnalysisCache::new(store);
    assert!(cache.lookup_hash(hash).await.is_none());
}

#[tokio::test]
async fn test_memory_is_bounded() {
    let cache = AnalysisCache::with_capacity(MemoryResultStore::new(), 2);
    for i in 0..10 {
        cache.store(&format!("doc {i}"), &result(0)).await;
    }
    cache.run_pending_tasks();

    assert!(cache.memory_entries() <= 2);
    assert_eq!(cache.backend().len(), 10);
    assert!(cache.lookup("doc 0").await.is_some());
}

#[test]
fn test_tier_names() {
    assert_eq!(CacheTier::Memory.as_str(), "memory");
    assert_eq!(CacheTier::Durable.as_str(), "durable");
}
