use std::time::Duration;

/// Base TTL in seconds of the per-method refresh lock. Rate limit cooldowns are added on top.
pub const REFRESH_LOCK_BASE_TTL_SECS: u64 = 5 * 60;

/// Smallest cooldown honoured after the provider signals a rate limit.
pub const MIN_RATE_LIMIT_COOLDOWN_SECS: u64 = 5;

/// Longest delivery delay SQS accepts for a single message.
pub const MAX_QUEUE_DELAY: Duration = Duration::from_secs(15 * 60);

/// Version of the refresher, reported by the health route
pub const REFRESHER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Priority attached to collection metadata updates requested for unresolvable slugs
pub const COLLECTION_METADATA_UPDATE_PRIORITY: u32 = 0;
