/// Collection holding pending refresh requests
pub const PENDING_REFRESH_COLLECTION: &str = "pending_refresh_requests";

/// Collection holding the distributed locks, one document per key
pub const LOCKS_COLLECTION: &str = "locks";

/// Collection of indexed tokens, read to find a representative token of a collection
pub const TOKENS_COLLECTION: &str = "tokens";

/// Server error code of a unique index violation
pub const DUPLICATE_KEY_ERROR_CODE: i32 = 11000;
