pub mod error;
pub mod memory;
pub mod mongodb;

use crate::types::RefreshRequest;
use async_trait::async_trait;
pub use error::BacklogError;

/// Durable queue of pending refresh requests, shared by every refresher instance.
///
/// Prioritized requests are handed out before non-prioritized ones; among prioritized requests the
/// most recent push wins, while non-prioritized requests are served oldest first. There is no
/// deduplication on slug.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshBacklog: Send + Sync {
    /// Removes and returns at most `count` requests. Empty once the backlog is exhausted.
    async fn get(&self, count: usize) -> Result<Vec<RefreshRequest>, BacklogError>;

    /// Adds a request. Never drops it.
    async fn add(&self, request: RefreshRequest, prioritized: bool) -> Result<(), BacklogError>;

    /// Number of pending requests
    async fn len(&self) -> Result<u64, BacklogError>;
}
