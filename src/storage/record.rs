use rkyv::{Archive, Deserialize, Serialize};

use crate::hashing::ContentHash;

/// One persisted analysis result.
#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct CacheRecord {
    /// BLAKE3 digest of the document text.
    pub content_hash: [u8; 32],
    /// Unix timestamp of the write.
    pub created_at: i64,
    /// Serialized [`AnalysisResult`](crate::analysis::AnalysisResult).
    pub result_json: String,
}

impl CacheRecord {
    pub fn new(hash: ContentHash, result_json: String) -> Self {
        Self {
            content_hash: *hash.as_bytes(),
            created_at: chrono::Utc::now().timestamp(),
            result_json,
        }
    }

    pub fn hash(&self) -> ContentHash {
        ContentHash::from_bytes(self.content_hash)
    }
}
