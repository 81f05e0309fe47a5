//! Concerns, verdicts and the safety score.

pub mod checklist;
pub mod error;
pub mod result;

#[cfg(test)]
mod tests;

pub use checklist::{Checklist, Concern, DEFAULT_CONCERNS};
pub use error::ChecklistError;
pub use result::{AnalysisResult, is_flagged, safety_score};
