use crate::core::client::backlog::BacklogError;
use crate::core::client::database::DatabaseError;
use crate::core::client::dispatch::DispatchError;
use crate::core::client::lock::LockError;
use crate::core::client::queue::QueueError;
use std::time::Duration;
use thiserror::Error;

pub type RefreshResult<T> = Result<T, RefreshError>;

/// Failures of a whole scheduler invocation.
///
/// Per-request fetch failures never show up here, they are absorbed by the fan-out.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Backlog error: {0}")]
    Backlog(#[from] BacklogError),

    #[error("Lock error: {0}")]
    Lock(#[from] LockError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Token lookup error: {0}")]
    Tokens(#[from] DatabaseError),

    #[error("Failed to enqueue refresh trigger: {0}")]
    Trigger(#[from] QueueError),

    #[error("Refresh invocation exceeded its budget of {0:?}")]
    Timeout(Duration),

    #[error("Invalid trigger message: {0}")]
    InvalidTrigger(String),
}
