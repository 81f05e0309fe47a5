use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("checklist is empty")]
    Empty,

    #[error("concern {index} is blank")]
    BlankConcern { index: usize },

    #[error("duplicate concern: {text}")]
    DuplicateConcern { text: String },

    #[error("failed to read checklist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("checklist {path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
