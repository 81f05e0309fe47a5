//! Relevance ranking of pooled candidates.
//!
//! [`CandidateRanker`] scores every candidate in a [`CandidatePool`](crate::retrieval::CandidatePool)
//! against the concern with a [`RelevanceScorer`](crate::embedding::RelevanceScorer) and keeps the
//! best `top_n`. Equal scores keep pool order.

pub mod error;
pub mod ranker;
pub mod types;


pub use error::RankingError;
pub use ranker::CandidateRanker;
pub use types::RankedCandidate;
