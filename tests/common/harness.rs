//! Spawns the HTTP gateway on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use clausewatch::analysis::Checklist;
use clausewatch::cache::AnalysisCache;
use clausewatch::gateway::{AppState, create_router_with_state};
use clausewatch::pipeline::{AnalysisPipeline, PipelineConfig};
use clausewatch::storage::DiskResultStore;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::collaborators::Counters;
use super::fixtures::test_checklist;

pub struct TestServerConfig {
    pub checklist: Checklist,
    pub pipeline: PipelineConfig,
    pub counters: Option<Counters>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            checklist: test_checklist(),
            pipeline: PipelineConfig::default(),
            counters: None,
        }
    }
}

pub struct TestServer {
    addr: SocketAddr,
    pub counters: Counters,
    pub storage: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_test_server(config: TestServerConfig) -> anyhow::Result<TestServer> {
    let storage = TempDir::new()?;
    let counters = config
        .counters
        .unwrap_or_else(|| Counters::answering(&config.checklist, &[]));

    let store = DiskResultStore::open(storage.path().to_path_buf())?;
    let pipeline = AnalysisPipeline::new(
        config.pipeline,
        config.checklist,
        counters.collaborators(),
        AnalysisCache::new(store),
    )?;

    let state = AppState::new(Arc::new(pipeline), Some(storage.path().to_path_buf()));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        addr,
        counters,
        storage,
        handle,
    })
}
