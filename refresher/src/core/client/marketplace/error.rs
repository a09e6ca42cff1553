use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider asked us to back off for `expires_in_seconds`
    #[error("Rate limited by the provider for {expires_in_seconds}s")]
    RateLimited { expires_in_seconds: u64 },

    /// Transport level failure (timeout, connection refused, ...)
    #[error("Network error while fetching {slug}: {message}")]
    NetworkError { slug: String, message: String },

    /// Non-success, non rate limit status
    #[error("Provider error for {slug} (status {status}): {message}")]
    ApiError { slug: String, status: StatusCode, message: String },

    #[error("Failed to parse provider response for {slug}: {message}")]
    ParseError { slug: String, message: String },

    #[error("Failed to build provider URL for {slug}: {message}")]
    UrlError { slug: String, message: String },
}

impl FetchError {
    /// Get error type as a string for metrics
    pub fn error_type(&self) -> &'static str {
        match self {
            FetchError::RateLimited { .. } => "rate_limited",
            FetchError::NetworkError { .. } => "network_error",
            FetchError::ApiError { .. } => "api_error",
            FetchError::ParseError { .. } => "parse_error",
            FetchError::UrlError { .. } => "url_error",
        }
    }

    pub fn from_reqwest_error(slug: &str, source: reqwest::Error) -> Self {
        if source.is_decode() {
            return FetchError::ParseError { slug: slug.to_string(), message: source.to_string() };
        }
        match source.status() {
            Some(status) => FetchError::ApiError { slug: slug.to_string(), status, message: source.to_string() },
            None => FetchError::NetworkError { slug: slug.to_string(), message: source.to_string() },
        }
    }
}
