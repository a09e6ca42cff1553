pub mod refresh;

use thiserror::Error;

use crate::core::client::backlog::BacklogError;
use crate::core::client::database::DatabaseError;
use crate::core::client::lock::LockError;
use crate::core::client::queue::QueueError;
pub use refresh::{RefreshError, RefreshResult};

/// Result type for refresher operations
pub type RefresherResult<T> = Result<T, RefresherError>;

/// Error types for the refresher
#[derive(Error, Debug)]
pub enum RefresherError {
    #[error("Queue error: {0}")]
    QueueCoreError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseCoreError(#[from] DatabaseError),

    #[error("Backlog error: {0}")]
    BacklogCoreError(#[from] BacklogError),

    #[error("Lock error: {0}")]
    LockCoreError(#[from] LockError),

    #[error("Refresh error: {0}")]
    RefreshError(#[from] RefreshError),

    /// Run Command error
    #[error("Run Command Error: {0}")]
    RunCommandError(String),

    /// Failure while building a client from the run command
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Refresher Error: {0}")]
    RefresherAnyHowError(#[from] anyhow::Error),
}
