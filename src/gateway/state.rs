use std::path::PathBuf;
use std::sync::Arc;

use crate::pipeline::AnalysisPipeline;
use crate::storage::ResultStore;

pub struct AppState<S> {
    pub pipeline: Arc<AnalysisPipeline<S>>,

    /// Checked by `/ready`; `None` when the store is not on disk.
    pub storage_path: Option<PathBuf>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            storage_path: self.storage_path.clone(),
        }
    }
}

impl<S: ResultStore> AppState<S> {
    pub fn new(pipeline: Arc<AnalysisPipeline<S>>, storage_path: Option<PathBuf>) -> Self {
        Self {
            pipeline,
            storage_path,
        }
    }

    pub fn storage_ready(&self) -> bool {
        self.storage_path.as_ref().is_none_or(|path| path.is_dir())
    }
}
