pub mod error;
pub mod sqs;

use crate::types::queue::QueueType;
use async_trait::async_trait;
pub use error::QueueError;
use omniqueue::Delivery;
use std::time::Duration;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Send a raw payload, optionally delivered only after `delay`.
    async fn send_message(&self, queue: QueueType, payload: String, delay: Option<Duration>) -> Result<(), QueueError>;

    /// Receive the next message. Fails with `omniqueue::QueueError::NoData` when the queue is empty.
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError>;
}
