use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::types::ApiResponse;

#[derive(Error, Debug)]
pub enum RefreshRouteError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Backlog unavailable: {0}")]
    BacklogUnavailable(String),

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),
}

impl IntoResponse for RefreshRouteError {
    fn into_response(self) -> Response {
        let status = match self {
            RefreshRouteError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RefreshRouteError::BacklogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RefreshRouteError::SubmissionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}
