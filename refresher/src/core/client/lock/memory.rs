use super::{LockClient, LockError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Process local lock table. Expiry uses the tokio clock so paused-time tests can advance it.
#[derive(Debug, Default)]
pub struct InMemoryLockClient {
    locks: Mutex<HashMap<String, Instant>>,
}

impl InMemoryLockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of a live lock
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let locks = self.locks.lock().await;
        locks.get(key).and_then(|expires_at| expires_at.checked_duration_since(Instant::now()))
    }

    fn validate(key: &str) -> Result<(), LockError> {
        if key.is_empty() {
            return Err(LockError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LockClient for InMemoryLockClient {
    async fn acquire_lock(&self, key: &str, expiry_seconds: u64) -> Result<bool, LockError> {
        Self::validate(key)?;
        let mut locks = self.locks.lock().await;
        let now = Instant::now();
        match locks.get(key) {
            Some(expires_at) if *expires_at > now => Ok(false),
            _ => {
                locks.insert(key.to_string(), now + Duration::from_secs(expiry_seconds));
                Ok(true)
            }
        }
    }

    async fn extend_lock(&self, key: &str, expiry_seconds: u64) -> Result<bool, LockError> {
        Self::validate(key)?;
        let mut locks = self.locks.lock().await;
        let now = Instant::now();
        match locks.get_mut(key) {
            Some(expires_at) if *expires_at > now => {
                *expires_at = now + Duration::from_secs(expiry_seconds);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_lock(&self, key: &str) -> Result<(), LockError> {
        self.locks.lock().await.remove(key);
        Ok(())
    }

    async fn is_locked(&self, key: &str) -> Result<bool, LockError> {
        let locks = self.locks.lock().await;
        Ok(locks.get(key).is_some_and(|expires_at| *expires_at > Instant::now()))
    }
}
