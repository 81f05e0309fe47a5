use std::collections::HashSet;
use std::sync::Arc;

use super::RetrievedChunk;

/// Chunks gathered for one concern, unique by exact text, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    texts: Vec<Arc<str>>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` unless an identical text is already pooled. Returns whether it was added.
    pub fn push(&mut self, text: Arc<str>) -> bool {
        if self.texts.iter().any(|t| *t == text) {
            return false;
        }
        self.texts.push(text);
        true
    }

    pub fn extend(&mut self, hits: impl IntoIterator<Item = RetrievedChunk>) {
        for hit in hits {
            self.push(hit.text);
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[Arc<str>] {
        &self.texts
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|t| &**t)
    }
}

impl FromIterator<Arc<str>> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Arc<str>>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let texts = iter
            .into_iter()
            .filter(|t| seen.insert(Arc::clone(t)))
            .collect();
        Self { texts }
    }
}
