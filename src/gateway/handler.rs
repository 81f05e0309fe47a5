use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::error::GatewayError;
use super::state::AppState;
use super::{
    ComponentStatus, HealthResponse, ReadyResponse, STATUS_ERROR, STATUS_HEADER, STATUS_HEALTHY,
    STATUS_READY,
};
use crate::analysis::AnalysisResult;
use crate::storage::ResultStore;

/// Body of `POST /analyze`. `url` identifies the document in logs only.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    pub text: String,
}

#[instrument(skip_all, fields(url = %request.url))]
pub async fn analyze_handler<S: ResultStore>(
    State(state): State<AppState<S>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, GatewayError> {
    let result = state.pipeline.analyze(&request.url, &request.text).await?;
    Ok(Json(result))
}

#[instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_HEALTHY));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[instrument(skip(state))]
pub async fn ready_handler<S: ResultStore>(State(state): State<AppState<S>>) -> Response {
    let storage = if state.storage_ready() {
        STATUS_READY
    } else {
        STATUS_ERROR
    };

    let modes = state.pipeline.modes();
    let components = ComponentStatus {
        http: STATUS_READY,
        storage,
        embedder: modes.embedder,
        reranker: modes.reranker,
        generator: modes.generator,
        concerns: state.pipeline.checklist().len(),
    };

    let is_ready = components.storage == STATUS_READY;
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        STATUS_HEADER,
        HeaderValue::from_static(if is_ready { STATUS_READY } else { STATUS_ERROR }),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
