use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
/// Candidate chunk annotated with its relevance score for one concern.
pub struct RankedCandidate {
    /// The chunk text.
    pub text: Arc<str>,
    /// Relevance score. Higher is more relevant.
    pub score: f32,
    /// Position in the candidate pool before ranking.
    pub pool_position: usize,
}

impl RankedCandidate {
    pub fn new(text: Arc<str>, score: f32, pool_position: usize) -> Self {
        Self {
            text,
            score,
            pool_position,
        }
    }
}
