use crate::core::client::queue::QueueError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Failed to serialize message: {0}")]
    SerializationError(#[from] serde_json::Error),
}
