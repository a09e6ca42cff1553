use crate::core::config::Config;
use crate::error::{RefreshError, RefreshResult};
use crate::types::constant::{MAX_QUEUE_DELAY, REFRESH_LOCK_BASE_TTL_SECS};
use crate::types::queue::QueueType;
use crate::types::RefreshRequest;
use crate::worker::parser::trigger_message::TriggerMessage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Entry points that start refresh runs.
pub struct RefreshTrigger {
    config: Arc<Config>,
}

impl RefreshTrigger {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Schedule one scheduler invocation after `delay`.
    pub async fn enqueue(&self, delay: Duration) -> RefreshResult<()> {
        self.send(TriggerMessage::new(self.config.method()), delay).await
    }

    /// Re-send `message` after `delay`, used by the job runner retry policy.
    ///
    /// A delay beyond what the queue accepts is split: the message is delivered after the queue
    /// maximum and carries the rest in `deferred_secs` for the runner to wait out.
    pub async fn send(&self, message: TriggerMessage, delay: Duration) -> RefreshResult<()> {
        let (message, delay) = if delay > MAX_QUEUE_DELAY {
            let deferred = delay - MAX_QUEUE_DELAY;
            (message.deferred(deferred.as_secs()), MAX_QUEUE_DELAY)
        } else {
            (message, delay)
        };

        let payload = serde_json::to_string(&message).map_err(|e| RefreshError::InvalidTrigger(e.to_string()))?;
        let delay = (!delay.is_zero()).then_some(delay);
        self.config.queue().send_message(QueueType::RefreshTrigger, payload, delay).await?;
        debug!(
            method = %message.method,
            attempt = message.attempt,
            deferred_secs = message.deferred_secs,
            delay = ?delay,
            "Enqueued refresh trigger"
        );
        Ok(())
    }

    /// Add `requests` to the backlog and start a run unless one is already active.
    ///
    /// Returns whether a new run was started.
    pub async fn submit(&self, requests: Vec<RefreshRequest>, prioritized: bool) -> RefreshResult<bool> {
        if requests.is_empty() {
            return Ok(false);
        }

        let submitted = requests.len();
        for request in requests {
            self.config.backlog().add(request, prioritized).await?;
        }

        let started = self.start_run_if_idle().await?;
        info!(submitted, prioritized, started, "Submitted refresh requests");
        Ok(started)
    }

    /// Start a run when the backlog holds requests but nobody owns the method, e.g. after the
    /// previous run died and its lock expired.
    pub async fn resume(&self) -> RefreshResult<bool> {
        if self.config.backlog().len().await? == 0 {
            return Ok(false);
        }
        self.start_run_if_idle().await
    }

    async fn start_run_if_idle(&self) -> RefreshResult<bool> {
        if !self.config.lock().acquire_lock(self.config.method(), REFRESH_LOCK_BASE_TTL_SECS).await? {
            debug!("A refresh run is already active");
            return Ok(false);
        }
        self.enqueue(Duration::ZERO).await?;
        Ok(true)
    }
}
