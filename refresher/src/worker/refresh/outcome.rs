use crate::types::MetadataItem;
use std::time::Duration;

/// What happened to a single popped request.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Contract is denylisted, nothing was fetched
    Skipped,
    Fetched { metadata: Vec<MetadataItem>, continuation: Option<String> },
    /// Empty page without continuation, fallback refreshes were dispatched
    Unresolvable,
    RateLimited { cooldown_seconds: u64 },
    /// Any other fetch failure, a full collection refresh was dispatched
    Failed,
}

impl ItemOutcome {
    /// Metric label
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemOutcome::Skipped => "skipped",
            ItemOutcome::Fetched { .. } => "fetched",
            ItemOutcome::Unresolvable => "unresolvable",
            ItemOutcome::RateLimited { .. } => "rate_limited",
            ItemOutcome::Failed => "failed",
        }
    }
}

/// Reduction of every [`ItemOutcome`] of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Every fetched item, in the order the requests were popped
    pub metadata: Vec<MetadataItem>,
    /// Largest cooldown asked by a rate limited request, 0 if none
    pub rate_limit_cooldown_seconds: u64,
    /// Some request produced a continuation
    pub should_retry: bool,
    /// Number of requests popped from the backlog
    pub popped: usize,
}

impl BatchSummary {
    pub fn reduce(popped: usize, outcomes: impl IntoIterator<Item = ItemOutcome>) -> Self {
        outcomes.into_iter().fold(Self { popped, ..Default::default() }, |mut summary, outcome| {
            match outcome {
                ItemOutcome::Fetched { metadata, continuation } => {
                    summary.should_retry |= continuation.is_some();
                    summary.metadata.extend(metadata);
                }
                ItemOutcome::RateLimited { cooldown_seconds } => {
                    summary.rate_limit_cooldown_seconds = summary.rate_limit_cooldown_seconds.max(cooldown_seconds);
                }
                ItemOutcome::Skipped | ItemOutcome::Unresolvable | ItemOutcome::Failed => {}
            }
            summary
        })
    }

    /// True when another invocation should follow this one.
    ///
    /// A full batch only suggests more work is pending: a backlog holding exactly `batch_size`
    /// requests costs one extra, empty, invocation.
    pub fn needs_reschedule(&self, batch_size: usize) -> bool {
        self.rate_limit_cooldown_seconds > 0 || self.popped == batch_size || self.should_retry
    }
}

/// Result of one scheduler invocation. The job runner owns the actual re-enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Nothing left to do, the lock was released
    Drained,
    /// The lock was extended, run again after `delay`
    Rescheduled { delay: Duration },
    /// The lock could not be extended, another run owns the method
    LockLost,
}

impl InvocationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationOutcome::Drained => "drained",
            InvocationOutcome::Rescheduled { .. } => "rescheduled",
            InvocationOutcome::LockLost => "lock_lost",
        }
    }
}
