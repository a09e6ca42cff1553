use crate::core::config::Config;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use public::local_route;
use refresh::refresh_router;
use std::sync::Arc;

pub(super) mod public;
pub(super) mod refresh;

/// Fallback for unknown routes
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    Router::new().merge(local_route()).nest("/refresh", refresh_router(config)).fallback(handler_404)
}
