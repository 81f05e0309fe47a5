//! Content addressing for analysis results.
//!
//! The cache key is the full 256-bit BLAKE3 digest of the document text. Nothing else about
//! the request (source URL, timestamps) participates, so identical text from two sources maps
//! to the same entry.

use std::fmt;

/// BLAKE3 digest of a document's full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hashes `text` as UTF-8 bytes.
    #[inline]
    pub fn of(text: &str) -> Self {
        Self(*blake3::hash(text.as_bytes()).as_bytes())
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex (64 chars); used for storage file names.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from_bytes(self.0).to_hex().to_string()
    }

    /// Parses the output of [`ContentHash::to_hex`].
    pub fn from_hex(hex: &str) -> Option<Self> {
        blake3::Hash::from_hex(hex)
            .ok()
            .map(|h| Self(*h.as_bytes()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Shorthand for [`ContentHash::of`].
#[inline]
pub fn content_hash(text: &str) -> ContentHash {
    ContentHash::of(text)
}
