use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ChecklistError;

/// The default constitution.
pub const DEFAULT_CONCERNS: [&str; 6] = [
    "Does the policy allow them to sell my data to third parties?",
    "Is there a mandatory binding arbitration clause?",
    "Does it force me to waive my right to a class action lawsuit?",
    "Do they claim a license to use my content (IP) for any purpose?",
    "Can they track my location when I am not using the app?",
    "Can they change the terms without notifying me first?",
];

/// One checklist question. Its text is also its key in the verdict map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concern(Arc<str>);

impl Concern {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Concern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, non-empty list of unique concerns. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    concerns: Arc<[Concern]>,
}

impl Checklist {
    pub fn new<I, S>(concerns: I) -> Result<Self, ChecklistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let concerns: Vec<Concern> = concerns.into_iter().map(Concern::new).collect();

        if concerns.is_empty() {
            return Err(ChecklistError::Empty);
        }

        let mut seen = HashSet::with_capacity(concerns.len());
        for (index, concern) in concerns.iter().enumerate() {
            if concern.as_str().trim().is_empty() {
                return Err(ChecklistError::BlankConcern { index });
            }
            if !seen.insert(concern.as_str()) {
                return Err(ChecklistError::DuplicateConcern {
                    text: concern.to_string(),
                });
            }
        }

        Ok(Self {
            concerns: concerns.into(),
        })
    }

    /// Reads a JSON array of concern strings.
    pub fn from_json_file(path: &Path) -> Result<Self, ChecklistError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ChecklistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let concerns: Vec<String> =
            serde_json::from_str(&raw).map_err(|source| ChecklistError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let checklist = Self::new(concerns)?;
        info!(path = %path.display(), concerns = checklist.len(), "Loaded checklist");
        Ok(checklist)
    }

    pub fn len(&self) -> usize {
        self.concerns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concerns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Concern> {
        self.concerns.iter()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.concerns.iter().any(|c| c.as_str() == text)
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self {
            concerns: DEFAULT_CONCERNS.iter().map(|&c| Concern::new(c)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Checklist {
    type Item = &'a Concern;
    type IntoIter = std::slice::Iter<'a, Concern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
