//! Overlapping document segmentation.
//!
//! [`Chunker::split`] walks the text lazily. Each chunk is at most `chunk_size` characters and
//! starts `overlap` characters before the previous one ended, so every character lands in at
//! least one chunk and text around a boundary is seen whole by one of its neighbours.
//!
//! Cuts prefer paragraph breaks, then line breaks, then spaces, searched in the second half of
//! the window; a window with none of them is cut hard at `chunk_size`.

pub mod error;


pub use error::ChunkerError;

use crate::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Chunk sizing, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkerConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkerConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn validate(&self) -> Result<(), ChunkerError> {
        if self.chunk_size == 0 {
            return Err(ChunkerError::ZeroChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkerError::OverlapTooLarge {
                overlap: self.overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

/// A contiguous slice of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the chunk sequence.
    pub index: usize,
    /// Byte offset into the source text.
    pub offset: usize,
    pub text: String,
}

impl Chunk {
    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset one past the last byte of this chunk.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Result<Self, ChunkerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Lazily splits `text` into overlapping chunks. Empty input yields nothing.
    pub fn split<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks::new(text, self.config)
    }
}

/// Iterator returned by [`Chunker::split`].
#[derive(Debug)]
pub struct Chunks<'a> {
    text: &'a str,
    /// Byte offset of every char, plus `text.len()` as a sentinel.
    boundaries: Vec<usize>,
    config: ChunkerConfig,
    start: usize,
    next_index: usize,
    done: bool,
}

impl<'a> Chunks<'a> {
    fn new(text: &'a str, config: ChunkerConfig) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());

        Self {
            text,
            done: text.is_empty(),
            boundaries,
            config,
            start: 0,
            next_index: 0,
        }
    }

    fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Picks the end (exclusive, in chars) of a window running from `start` to `limit`.
    fn cut_point(&self, start: usize, limit: usize) -> usize {
        let floor = start + (self.config.chunk_size / 2).max(self.config.overlap + 1);
        if floor >= limit {
            return limit;
        }

        let base = self.boundaries[floor];
        let window = &self.text[base..self.boundaries[limit]];

        for sep in SEPARATORS {
            if let Some(pos) = window.rfind(sep)
                && let Ok(idx) = self.boundaries.binary_search(&(base + pos + sep.len()))
            {
                return idx;
            }
        }

        limit
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.done {
            return None;
        }

        let total = self.char_count();
        let start = self.start;
        let end = if total - start <= self.config.chunk_size {
            total
        } else {
            self.cut_point(start, start + self.config.chunk_size)
        };

        let chunk = Chunk {
            index: self.next_index,
            offset: self.boundaries[start],
            text: self.text[self.boundaries[start]..self.boundaries[end]].to_string(),
        };
        self.next_index += 1;

        if end == total {
            self.done = true;
        } else {
            self.start = end.saturating_sub(self.config.overlap).max(start + 1);
        }

        Some(chunk)
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
