use clap::Args;

/// Parameters of the batch scheduler and its job runner.
#[derive(Debug, Clone, Args)]
pub struct RefreshCliArgs {
    /// Number of requests fetched concurrently per page round.
    #[arg(env = "METADATA_REFRESHER_PARALLEL_FANOUT_LIMIT", long, default_value_t = 10)]
    pub parallel_fanout_limit: usize,

    /// Page rounds drained per invocation. Batch size is the product with the fanout limit.
    #[arg(env = "METADATA_REFRESHER_PER_REQUEST_PAGE_COUNT", long, default_value_t = 1)]
    pub per_request_page_count: usize,

    /// Contracts that are never fetched (comma separated addresses).
    #[arg(env = "METADATA_REFRESHER_DENYLISTED_CONTRACTS", long, value_delimiter = ',')]
    pub denylisted_contracts: Vec<String>,

    /// Wall clock budget of one scheduler invocation, in seconds. Must stay below the 300s lock TTL.
    #[arg(env = "METADATA_REFRESHER_JOB_TIMEOUT_SECS", long, default_value_t = 240)]
    pub job_timeout_secs: u64,

    /// Attempts granted to a failing invocation before its trigger is dropped.
    #[arg(env = "METADATA_REFRESHER_JOB_MAX_ATTEMPTS", long, default_value_t = 10)]
    pub job_max_attempts: u32,

    /// Fixed delay between attempts of a failing invocation, in seconds.
    #[arg(env = "METADATA_REFRESHER_JOB_RETRY_DELAY_SECS", long, default_value_t = 5)]
    pub job_retry_delay_secs: u64,
}
