use axum::routing::get;
use axum::{Json, Router};

use crate::server::types::{ApiResponse, HealthResponse};
use crate::types::constant::REFRESHER_VERSION;

pub(super) fn local_route() -> Router {
    Router::new().route("/health", get(health_checker_handler))
}

async fn health_checker_handler() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success_with_data(
        HealthResponse { status: "UP".to_string(), version: REFRESHER_VERSION.to_string() },
        None,
    ))
}
