use crate::core::config::Config;
use crate::error::{RefreshError, RefreshResult};
use crate::types::constant::REFRESH_LOCK_BASE_TTL_SECS;
use crate::types::queue::QueueType;
use crate::utils::metrics::REFRESHER_METRICS;
use crate::worker::parser::trigger_message::TriggerMessage;
use crate::worker::refresh::{InvocationOutcome, RefreshScheduler};
use crate::worker::trigger::RefreshTrigger;
use omniqueue::Delivery;
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

const QUEUE_NO_MESSAGE_SLEEP_DURATION: Duration = Duration::from_millis(1000);
const QUEUE_ERROR_SLEEP_DURATION: Duration = Duration::from_secs(1);

/// Consumes the `refresh_trigger` queue and runs one scheduler invocation per message.
///
/// Invocations never overlap inside a process, the distributed lock covers the other processes.
#[derive(Clone)]
pub struct RefreshJobRunner {
    config: Arc<Config>,
    scheduler: Arc<RefreshScheduler>,
    trigger: Arc<RefreshTrigger>,
    in_flight: Arc<Mutex<()>>,
    cancellation_token: CancellationToken,
}

impl RefreshJobRunner {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self {
            scheduler: Arc::new(RefreshScheduler::new(config.clone())),
            trigger: Arc::new(RefreshTrigger::new(config.clone())),
            config,
            in_flight: Arc::new(Mutex::new(())),
            cancellation_token,
        }
    }

    /// Triggers a graceful shutdown
    pub fn shutdown(&self) {
        info!("Triggering shutdown for the refresh job runner");
        self.cancellation_token.cancel();
    }

    /// Run one invocation for `message` and apply its outcome.
    ///
    /// A rescheduled invocation enqueues a fresh trigger. A failed or timed out invocation is
    /// retried with a fixed backoff under a refreshed lock until the attempts run out, after which
    /// the trigger is dropped and the lock TTL lets a later producer start over. A trigger still
    /// carrying a deferral is only re-sent.
    pub async fn handle_trigger(&self, message: &TriggerMessage) -> RefreshResult<()> {
        if message.deferred_secs > 0 {
            debug!(deferred_secs = message.deferred_secs, "Cooldown not over yet, deferring refresh trigger");
            return self.trigger.send(message.deferred(0), Duration::from_secs(message.deferred_secs)).await;
        }

        let _guard = self.in_flight.lock().await;
        let params = self.config.refresh_params();

        let started = Instant::now();
        let result = match tokio::time::timeout(params.job_timeout, self.scheduler.run_invocation()).await {
            Ok(result) => result,
            Err(_) => Err(RefreshError::Timeout(params.job_timeout)),
        };

        let label = match &result {
            Ok(outcome) => outcome.as_str(),
            Err(RefreshError::Timeout(_)) => "timeout",
            Err(_) => "error",
        };
        REFRESHER_METRICS.refresh_invocations.add(1, &[KeyValue::new("outcome", label)]);
        REFRESHER_METRICS
            .refresh_invocation_duration
            .record(started.elapsed().as_secs_f64(), &[KeyValue::new("outcome", label)]);

        match result {
            Ok(InvocationOutcome::Rescheduled { delay }) => self.trigger.enqueue(delay).await,
            Ok(InvocationOutcome::Drained) | Ok(InvocationOutcome::LockLost) => Ok(()),
            Err(err) => self.retry(message, err).await,
        }
    }

    async fn retry(&self, message: &TriggerMessage, err: RefreshError) -> RefreshResult<()> {
        let params = self.config.refresh_params();
        let next = message.next_attempt();

        if next.attempt >= params.job_max_attempts {
            error!(
                attempt = message.attempt,
                max_attempts = params.job_max_attempts,
                error = %err,
                "Refresh invocation failed, giving up"
            );
            return Ok(());
        }

        // The lock must outlive the retried invocation, a vanished lock means a fresh run may already own the method.
        let ttl = REFRESH_LOCK_BASE_TTL_SECS + params.job_retry_delay.as_secs();
        if !self.config.lock().extend_lock(self.config.method(), ttl).await? {
            warn!(attempt = message.attempt, error = %err, "Refresh lock is gone, dropping failed trigger");
            return Ok(());
        }

        warn!(
            attempt = message.attempt,
            retry_in_secs = params.job_retry_delay.as_secs(),
            error = %err,
            "Refresh invocation failed, retrying"
        );
        self.trigger.send(next, params.job_retry_delay).await
    }

    /// Next message of the trigger queue, `None` when the queue is empty.
    async fn get_message(&self) -> RefreshResult<Option<Delivery>> {
        match self.config.queue().consume_message_from_queue(QueueType::RefreshTrigger).await {
            Ok(delivery) => Ok(Some(delivery)),
            Err(err) if err.is_no_data() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn process_message(&self, delivery: Delivery) -> RefreshResult<()> {
        let message = match TriggerMessage::parse_message(&delivery) {
            Ok(message) => message,
            Err(err) => {
                // Redelivering an unreadable payload would only fail again.
                error!(error = %err, "Dropping unreadable refresh trigger");
                return Self::ack(delivery).await;
            }
        };

        if message.method != self.config.method() {
            warn!(method = %message.method, expected = %self.config.method(), "Dropping trigger for another method");
            return Self::ack(delivery).await;
        }

        let correlation_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "refresh_invocation",
            method = %message.method,
            attempt = message.attempt,
            correlation_id = %correlation_id,
            span_type = "Worker"
        );

        match self.handle_trigger(&message).instrument(span).await {
            Ok(()) => Self::ack(delivery).await,
            Err(err) => {
                error!(error = %err, "Failed to handle refresh trigger");
                delivery.nack().await.map_err(|e| RefreshError::Trigger(e.0.into()))?;
                Err(err)
            }
        }
    }

    async fn ack(delivery: Delivery) -> RefreshResult<()> {
        delivery.ack().await.map_err(|e| RefreshError::Trigger(e.0.into()))
    }

    /// run - Consume the trigger queue until the cancellation token fires.
    ///
    /// Messages are handled one at a time, an in-flight invocation is allowed to finish on shutdown.
    pub async fn run(&self) -> RefreshResult<()> {
        info!(method = %self.config.method(), "Starting refresh job runner");

        loop {
            tokio::select! {
                biased;

                _ = self.cancellation_token.cancelled() => {
                    info!("Shutdown signal received, stopping refresh job runner");
                    break;
                }

                message = self.get_message() => {
                    match message {
                        Ok(Some(delivery)) => {
                            debug!(queue = %QueueType::RefreshTrigger, "Received message from queue");
                            if let Err(err) = self.process_message(delivery).await {
                                error!(error = %err, "Refresh trigger processing failed");
                            }
                        }
                        Ok(None) => sleep(QUEUE_NO_MESSAGE_SLEEP_DURATION).await,
                        Err(err) => {
                            error!(error = %err, "Error receiving message");
                            sleep(QUEUE_ERROR_SLEEP_DURATION).await;
                        }
                    }
                }
            }
        }

        info!("Refresh job runner stopped");
        Ok(())
    }
}
