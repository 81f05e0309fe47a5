use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    FLAG_PENALTY, MAX_SAFETY_SCORE, SHORT_TEXT_ERROR_KEY, SHORT_TEXT_ERROR_MESSAGE,
};

/// Final answer for one document: a verdict per concern plus the derived score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub safety_score: u32,
    pub analysis: BTreeMap<String, String>,
}

impl AnalysisResult {
    /// Scores `verdicts` and wraps them.
    pub fn from_verdicts(verdicts: BTreeMap<String, String>) -> Self {
        Self {
            safety_score: safety_score(verdicts.values()),
            analysis: verdicts,
        }
    }

    /// Result for input below the minimum length.
    pub fn too_short() -> Self {
        Self {
            safety_score: 0,
            analysis: BTreeMap::from([(
                SHORT_TEXT_ERROR_KEY.to_string(),
                SHORT_TEXT_ERROR_MESSAGE.to_string(),
            )]),
        }
    }

    pub fn flagged_count(&self) -> usize {
        self.analysis.values().filter(|v| is_flagged(v)).count()
    }

    pub fn verdict(&self, concern: &str) -> Option<&str> {
        self.analysis.get(concern).map(String::as_str)
    }
}

/// A verdict is flagged when it contains "YES" in any case.
pub fn is_flagged(verdict: &str) -> bool {
    verdict.to_uppercase().contains("YES")
}

/// `max(0, 100 - 15 * flagged)`.
pub fn safety_score<'a>(verdicts: impl IntoIterator<Item = &'a String>) -> u32 {
    let flagged = verdicts.into_iter().filter(|v| is_flagged(v)).count();
    let penalty = u32::try_from(flagged)
        .unwrap_or(u32::MAX)
        .saturating_mul(FLAG_PENALTY);
    MAX_SAFETY_SCORE.saturating_sub(penalty)
}
