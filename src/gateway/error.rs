use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::{STATUS_ERROR, STATUS_HEADER};
use crate::pipeline::AnalysisError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    AnalysisFailed(#[from] AnalysisError),
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::AnalysisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut headers = HeaderMap::new();
        headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_ERROR));

        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        (status, headers, body).into_response()
    }
}
