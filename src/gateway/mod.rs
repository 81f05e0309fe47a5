//! HTTP gateway (Axum) in front of [`AnalysisPipeline`](crate::pipeline::AnalysisPipeline).
//!
//! Routes:
//!
//! - `POST /analyze` takes `{"url", "text"}` and returns `{"safety_score", "analysis"}`.
//!   Any pipeline failure is a 500 with `{"detail": "..."}`.
//! - `GET /healthz` liveness.
//! - `GET /ready` storage status plus which collaborators are stubs.
//!
//! CORS is fully permissive; the browser extension calls from arbitrary origins.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{AnalyzeRequest, analyze_handler, health_handler, ready_handler};
pub use state::AppState;

use crate::storage::ResultStore;

pub const STATUS_HEADER: &str = "x-clausewatch-status";
pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_READY: &str = "ready";
pub const STATUS_ERROR: &str = "error";

pub fn create_router_with_state<S: ResultStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<S>))
        .route("/analyze", post(analyze_handler::<S>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub storage: &'static str,
    pub embedder: &'static str,
    pub reranker: &'static str,
    pub generator: String,
    pub concerns: usize,
}
