use super::outcome::{BatchSummary, InvocationOutcome, ItemOutcome};
use crate::core::client::marketplace::FetchError;
use crate::core::config::Config;
use crate::error::RefreshResult;
use crate::types::constant::{
    COLLECTION_METADATA_UPDATE_PRIORITY, MIN_RATE_LIMIT_COOLDOWN_SECS, REFRESH_LOCK_BASE_TTL_SECS,
};
use crate::types::RefreshRequest;
use crate::utils::metrics::REFRESHER_METRICS;
use futures::future::join_all;
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Drains the pending refresh backlog of one refresh method.
///
/// One call to [`RefreshScheduler::run_invocation`] pops a batch, fetches every request of it
/// concurrently, hands the fetched metadata downstream and decides whether the run continues.
/// The caller must hold the method lock for the whole invocation.
pub struct RefreshScheduler {
    config: Arc<Config>,
}

impl RefreshScheduler {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    #[instrument(skip_all, fields(method = %self.config.method()))]
    pub async fn run_invocation(&self) -> RefreshResult<InvocationOutcome> {
        let method = self.config.method();
        let batch_size = self.config.refresh_params().batch_size();

        let requests = self.config.backlog().get(batch_size).await?;
        if requests.is_empty() {
            self.config.lock().release_lock(method).await?;
            info!("Refresh backlog drained, lock released");
            return Ok(InvocationOutcome::Drained);
        }
        debug!(popped = requests.len(), batch_size, "Popped refresh requests");

        // Every request settles before anything is reduced, a failing request never cancels its siblings.
        let results = join_all(requests.iter().map(|request| self.process_request(request))).await;

        let mut outcomes = Vec::with_capacity(results.len());
        let mut first_error = None;
        for (request, result) in requests.iter().zip(results) {
            match result {
                Ok(outcome) => {
                    REFRESHER_METRICS.refresh_items.add(1, &[KeyValue::new("outcome", outcome.as_str())]);
                    outcomes.push(outcome);
                }
                Err(err) => {
                    error!(slug = %request.slug, contract = %request.contract, error = %err, "Failed to settle refresh request");
                    REFRESHER_METRICS.refresh_items.add(1, &[KeyValue::new("outcome", "error")]);
                    first_error.get_or_insert(err);
                }
            }
        }

        let summary = BatchSummary::reduce(requests.len(), outcomes);
        let reschedule = summary.needs_reschedule(batch_size);
        let BatchSummary { metadata, rate_limit_cooldown_seconds, should_retry, popped } = summary;
        let fetched = metadata.len();

        self.config.dispatcher().submit_fetched_metadata(metadata).await?;
        REFRESHER_METRICS.refresh_metadata_items.add(fetched as u64, &[]);

        if let Some(err) = first_error {
            return Err(err);
        }

        if !reschedule {
            self.config.lock().release_lock(method).await?;
            info!(popped, fetched, "Refresh batch complete, lock released");
            return Ok(InvocationOutcome::Drained);
        }

        let ttl = REFRESH_LOCK_BASE_TTL_SECS + rate_limit_cooldown_seconds;
        if !self.config.lock().extend_lock(method, ttl).await? {
            warn!(popped, fetched, "Refresh lock is gone, another run owns this method");
            return Ok(InvocationOutcome::LockLost);
        }

        let delay = Duration::from_secs(rate_limit_cooldown_seconds);
        info!(
            popped,
            fetched,
            should_retry,
            cooldown_seconds = rate_limit_cooldown_seconds,
            lock_ttl_seconds = ttl,
            "Refresh batch complete, rescheduling"
        );
        Ok(InvocationOutcome::Rescheduled { delay })
    }

    #[instrument(skip_all, fields(slug = %request.slug, contract = %request.contract))]
    async fn process_request(&self, request: &RefreshRequest) -> RefreshResult<ItemOutcome> {
        let method = self.config.method();

        if self.config.refresh_params().is_denylisted(&request.contract) {
            debug!("Contract is denylisted, skipping");
            return Ok(ItemOutcome::Skipped);
        }

        match self.config.fetcher().fetch(request.contract, &request.slug, method, request.continuation.clone()).await
        {
            Ok(page) if page.is_unresolvable() => {
                warn!("Slug resolved to no tokens, falling back to a full collection refresh");
                self.dispatch_unresolvable(request).await?;
                Ok(ItemOutcome::Unresolvable)
            }
            Ok(page) => {
                if let Some(continuation) = &page.continuation {
                    self.config.backlog().add(request.with_continuation(continuation.clone()), true).await?;
                    debug!(continuation = %continuation, "Requeued continuation");
                }
                debug!(fetched = page.metadata.len(), "Fetched metadata page");
                Ok(ItemOutcome::Fetched { metadata: page.metadata, continuation: page.continuation })
            }
            Err(FetchError::RateLimited { expires_in_seconds }) => {
                let cooldown_seconds = expires_in_seconds.max(MIN_RATE_LIMIT_COOLDOWN_SECS);
                self.config.backlog().add(request.clone(), true).await?;
                REFRESHER_METRICS.refresh_rate_limited.add(1, &[]);
                warn!(cooldown_seconds, "Rate limited by the provider, request requeued");
                Ok(ItemOutcome::RateLimited { cooldown_seconds })
            }
            Err(err) => {
                error!(error = %err, error_type = err.error_type(), "Metadata fetch failed, requesting a full collection refresh");
                self.config.dispatcher().request_full_collection_refresh(request.contract, method).await?;
                Ok(ItemOutcome::Failed)
            }
        }
    }

    async fn dispatch_unresolvable(&self, request: &RefreshRequest) -> RefreshResult<()> {
        let method = self.config.method();
        let dispatcher = self.config.dispatcher();

        dispatcher.request_full_collection_refresh(request.contract, method).await?;

        match self.config.tokens().representative_token(request.contract, &request.collection).await? {
            Some(token_id) => {
                dispatcher
                    .request_collection_metadata_update(
                        request.contract,
                        &token_id,
                        method,
                        COLLECTION_METADATA_UPDATE_PRIORITY,
                    )
                    .await?;
            }
            None => warn!(
                collection = %request.collection,
                "No indexed token for unresolvable slug, collection metadata update not requested"
            ),
        }
        Ok(())
    }
}
