use crate::types::RefreshRequest;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use super::error::RefreshRouteError;

/// Standard envelope of every JSON response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Optional message, typically used for error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self { success: false, data: None, message: Some(message) }
    }
}

impl<T> ApiResponse<T> {
    pub fn success_with_data(data: T, message: Option<String>) -> Self {
        Self { success: true, data: Some(data), message }
    }
}

pub type RefreshRouteResult = Result<Response<axum::body::Body>, RefreshRouteError>;

/// Body of `POST /refresh/collections`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitRefreshRequest {
    pub requests: Vec<RefreshRequest>,
    #[serde(default)]
    pub prioritized: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubmitRefreshResponse {
    pub submitted: usize,
    /// A new run was started by this submission
    pub started: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RefreshStatusResponse {
    pub method: String,
    pub pending: u64,
    pub running: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
