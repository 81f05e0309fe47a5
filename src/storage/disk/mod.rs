//! File-per-record store: `<root>/<first two hex chars>/<hash hex>.rkyv`.
//!
//! Writes go to a uniquely named temp file in the same directory and are renamed into place,
//! so readers see either the previous record or the new one. Concurrent writers of the same
//! hash race and the last rename wins.


use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rkyv::rancor::Error as RkyvError;
use rkyv::util::AlignedVec;
use tracing::{debug, warn};

use super::error::{StoreError, StoreResult};
use super::{CacheRecord, ResultStore};
use crate::hashing::ContentHash;

const RKYV_EXTENSION: &str = "rkyv";

const TEMP_EXTENSION: &str = "rkyv.tmp";

#[derive(Debug, Clone)]
pub struct DiskResultStore {
    root: PathBuf,
}

impl DiskResultStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Creates the root directory.
    pub fn open(root: PathBuf) -> StoreResult<Self> {
        let store = Self::new(root);
        store.ensure_root()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> StoreResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|_| StoreError::Unavailable {
                path: self.root.clone(),
            })?;
        }
        Ok(())
    }

    fn shard_dir(&self, hex: &str) -> PathBuf {
        self.root.join(&hex[..2])
    }

    pub fn record_path(&self, hash: &ContentHash) -> PathBuf {
        let hex = hash.to_hex();
        self.shard_dir(&hex)
            .join(format!("{}.{}", hex, RKYV_EXTENSION))
    }

    fn temp_path(&self, hash: &ContentHash) -> PathBuf {
        let hex = hash.to_hex();
        self.shard_dir(&hex)
            .join(format!("{}.{}.{}", hex, uuid::Uuid::new_v4(), TEMP_EXTENSION))
    }

    pub fn exists(&self, hash: &ContentHash) -> bool {
        self.record_path(hash).exists()
    }

    /// Number of records on disk.
    pub fn count(&self) -> StoreResult<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for shard in fs::read_dir(&self.root)? {
            let shard = shard?.path();
            if !shard.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&shard)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == RKYV_EXTENSION) {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    fn decode(path: &Path, bytes: &[u8]) -> StoreResult<CacheRecord> {
        let mut aligned: AlignedVec = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        rkyv::from_bytes::<CacheRecord, RkyvError>(&aligned).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl ResultStore for DiskResultStore {
    fn load(&self, hash: &ContentHash) -> StoreResult<Option<CacheRecord>> {
        let path = self.record_path(hash);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = Self::decode(&path, &bytes)?;
        if record.content_hash != *hash.as_bytes() {
            warn!(path = %path.display(), "Stored record hash does not match its key");
            return Ok(None);
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Loaded record");
        Ok(Some(record))
    }

    fn upsert(&self, record: &CacheRecord) -> StoreResult<()> {
        let hash = record.hash();
        let final_path = self.record_path(&hash);
        let temp_path = self.temp_path(&hash);

        if let Some(dir) = final_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let bytes = rkyv::to_bytes::<RkyvError>(record)
            .map_err(|e| StoreError::Serialization(format!("{:?}", e)))?;

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(path = %final_path.display(), bytes = bytes.len(), "Stored record");
        Ok(())
    }
}
