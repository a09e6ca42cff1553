use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info, instrument};

use crate::core::config::Config;
use crate::server::error::RefreshRouteError;
use crate::server::types::{
    ApiResponse, RefreshRouteResult, RefreshStatusResponse, SubmitRefreshRequest, SubmitRefreshResponse,
};
use crate::worker::trigger::RefreshTrigger;

/// Adds the requests to the backlog and starts a run when none is active.
#[instrument(skip_all, fields(requests = body.requests.len(), prioritized = body.prioritized))]
async fn handle_submit_refresh_request(
    State(config): State<Arc<Config>>,
    Json(body): Json<SubmitRefreshRequest>,
) -> RefreshRouteResult {
    if body.requests.is_empty() {
        return Err(RefreshRouteError::InvalidRequest("No refresh request given".to_string()));
    }
    if let Some(request) = body.requests.iter().find(|request| request.slug.trim().is_empty()) {
        return Err(RefreshRouteError::InvalidRequest(format!(
            "Empty slug for collection {}",
            request.collection
        )));
    }

    let submitted = body.requests.len();
    match RefreshTrigger::new(config).submit(body.requests, body.prioritized).await {
        Ok(started) => {
            info!(submitted, started, "Refresh requests accepted");
            Ok(Json(ApiResponse::success_with_data(
                SubmitRefreshResponse { submitted, started },
                Some(format!("{submitted} refresh requests queued")),
            ))
            .into_response())
        }
        Err(e) => {
            error!(error = %e, "Failed to submit refresh requests");
            Err(RefreshRouteError::SubmissionFailed(e.to_string()))
        }
    }
}

/// Backlog length and whether a run currently owns the method lock.
#[instrument(skip_all)]
async fn handle_refresh_status_request(State(config): State<Arc<Config>>) -> RefreshRouteResult {
    let pending = config.backlog().len().await.map_err(|e| RefreshRouteError::BacklogUnavailable(e.to_string()))?;
    let running = config
        .lock()
        .is_locked(config.method())
        .await
        .map_err(|e| RefreshRouteError::BacklogUnavailable(e.to_string()))?;

    Ok(Json(ApiResponse::success_with_data(
        RefreshStatusResponse { method: config.method().to_string(), pending, running },
        None,
    ))
    .into_response())
}

pub(super) fn refresh_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/collections", post(handle_submit_refresh_request))
        .route("/status", get(handle_refresh_status_request))
        .with_state(config)
}
