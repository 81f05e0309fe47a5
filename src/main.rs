//! Clausewatch HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use clausewatch::analysis::Checklist;
use clausewatch::cache::AnalysisCache;
use clausewatch::config::Config;
use clausewatch::embedding::{
    Embedder, RelevanceScorer, Reranker, RerankerConfig, SentenceConfig, SentenceEmbedder,
};
use clausewatch::gateway::{AppState, create_router_with_state};
use clausewatch::generation::{GenaiGenerator, Generator, OfflineGenerator};
use clausewatch::pipeline::{AnalysisPipeline, Collaborators, PipelineConfig};
use clausewatch::storage::DiskResultStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let pipeline_config = PipelineConfig::from_env()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Clausewatch starting"
    );

    let checklist = match &config.checklist_path {
        Some(path) => Checklist::from_json_file(path)?,
        None => Checklist::default(),
    };
    tracing::info!(concerns = checklist.len(), "Checklist loaded");

    let collaborators = Collaborators {
        embedder: load_embedder(&config)?,
        scorer: load_scorer(&config)?,
        generator: build_generator(&config, &checklist),
    };

    let store = DiskResultStore::open(config.storage_path.clone())?;
    let cache = AnalysisCache::with_capacity(store, config.memory_cache_capacity);

    let pipeline = AnalysisPipeline::new(pipeline_config, checklist, collaborators, cache)?;
    tracing::info!(modes = ?pipeline.modes(), "Pipeline ready");

    let state = AppState::new(Arc::new(pipeline), Some(config.storage_path.clone()));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Clausewatch shutdown complete");
    Ok(())
}

fn load_embedder(config: &Config) -> anyhow::Result<Arc<dyn Embedder>> {
    let sentence_config = if let Some(path) = &config.embedding_model_path {
        SentenceConfig::new(path.clone())
    } else {
        tracing::warn!("No CLAUSEWATCH_EMBEDDING_MODEL_PATH configured, running embedder in stub mode");
        SentenceConfig::stub()
    };
    Ok(Arc::new(SentenceEmbedder::load(sentence_config)?))
}

fn load_scorer(config: &Config) -> anyhow::Result<Arc<dyn RelevanceScorer>> {
    let reranker_config = if let Some(path) = &config.reranker_path {
        RerankerConfig::new(path.clone())
    } else {
        tracing::warn!("No CLAUSEWATCH_RERANKER_PATH configured, running reranker in stub mode");
        RerankerConfig::stub()
    };
    Ok(Arc::new(Reranker::load(reranker_config)?))
}

fn build_generator(config: &Config, checklist: &Checklist) -> Arc<dyn Generator> {
    if config.offline_generator {
        tracing::warn!("CLAUSEWATCH_OFFLINE_GENERATOR set, every concern will be answered NO");
        Arc::new(OfflineGenerator::new(checklist.clone()))
    } else {
        Arc::new(GenaiGenerator::new(config.generator_model.clone()))
    }
}

fn run_health_check() -> i32 {
    let port = std::env::var("CLAUSEWATCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
