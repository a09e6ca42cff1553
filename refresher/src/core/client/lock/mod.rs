pub mod error;
pub mod memory;
pub mod mongodb;

use async_trait::async_trait;
pub use error::LockError;

/// Named, time-bounded mutual exclusion shared across every process instance.
///
/// The refresher keys its lock by refresh method. Producers acquire it to learn whether a run must
/// be enqueued, the scheduler extends it for as long as it keeps finding work and releases it once
/// the backlog is drained.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LockClient: Send + Sync {
    /// Take the lock if nobody holds it, or if the previous holder let it expire.
    ///
    /// Returns `false` when a live lock already exists.
    async fn acquire_lock(&self, key: &str, expiry_seconds: u64) -> Result<bool, LockError>;

    /// Push the expiry of a live lock to `expiry_seconds` from now.
    ///
    /// Returns `false` when the lock is gone (released, expired or never taken): the caller no
    /// longer owns a run and must stop.
    async fn extend_lock(&self, key: &str, expiry_seconds: u64) -> Result<bool, LockError>;

    /// Remove the lock unconditionally. Releasing an absent lock is not an error.
    async fn release_lock(&self, key: &str) -> Result<(), LockError>;

    /// Check if a live lock exists
    async fn is_locked(&self, key: &str) -> Result<bool, LockError>;
}
