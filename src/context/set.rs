use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::Concern;
use crate::constants::CONTEXT_DELIMITER;
use crate::ranking::RankedCandidate;

/// Winning candidates for one concern.
#[derive(Debug, Clone)]
pub struct ConcernContext {
    pub concern: Concern,
    pub candidates: Vec<RankedCandidate>,
}

/// Union of every concern's winners, unique by exact text.
///
/// Insertion order follows the checklist, then rank within a concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSet {
    chunks: Vec<Arc<str>>,
    seen: HashSet<Arc<str>>,
}

impl ContextSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `text` unless already present. Returns whether it was added.
    pub fn insert(&mut self, text: Arc<str>) -> bool {
        if !self.seen.insert(Arc::clone(&text)) {
            return false;
        }
        self.chunks.push(text);
        true
    }

    /// Merges the complete per-concern results, in the order given.
    pub fn union<'a>(per_concern: impl IntoIterator<Item = &'a ConcernContext>) -> Self {
        let mut set = Self::new();
        for context in per_concern {
            for candidate in &context.candidates {
                set.insert(Arc::clone(&candidate.text));
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(text)
    }

    pub fn chunks(&self) -> &[Arc<str>] {
        &self.chunks
    }

    /// The single block handed to the generator.
    pub fn render(&self) -> String {
        self.chunks
            .iter()
            .map(|c| &**c)
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER)
    }
}
