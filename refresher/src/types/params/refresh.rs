use crate::cli::refresh::RefreshCliArgs;
use crate::error::RefresherError;
use crate::types::constant::REFRESH_LOCK_BASE_TTL_SECS;
use alloy_primitives::Address;
use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;

/// Tuning of the batch scheduler and of the job runner driving it.
#[derive(Debug, Clone)]
pub struct RefreshParams {
    /// Refresh method, also the key of the distributed lock
    pub method: String,
    pub parallel_fanout_limit: usize,
    pub per_request_page_count: usize,
    /// Contracts never fetched
    pub denylisted_contracts: HashSet<Address>,
    pub job_timeout: Duration,
    pub job_max_attempts: u32,
    pub job_retry_delay: Duration,
}

impl RefreshParams {
    /// Maximum number of requests popped by one invocation.
    pub fn batch_size(&self) -> usize {
        self.parallel_fanout_limit * self.per_request_page_count
    }

    pub fn is_denylisted(&self, contract: &Address) -> bool {
        self.denylisted_contracts.contains(contract)
    }
}

impl RefreshParams {
    pub fn from_cli_args(method: &str, args: RefreshCliArgs) -> Result<Self, RefresherError> {
        if args.parallel_fanout_limit == 0 {
            return Err(RefresherError::RunCommandError("Parallel fanout limit must be at least 1".to_string()));
        }
        if args.per_request_page_count == 0 {
            return Err(RefresherError::RunCommandError("Per request page count must be at least 1".to_string()));
        }
        // The lock is only refreshed between invocations, an invocation outliving it could overlap another run.
        if args.job_timeout_secs == 0 || args.job_timeout_secs >= REFRESH_LOCK_BASE_TTL_SECS {
            return Err(RefresherError::RunCommandError(format!(
                "Job timeout must be between 1 and {} seconds, got {}",
                REFRESH_LOCK_BASE_TTL_SECS - 1,
                args.job_timeout_secs
            )));
        }
        if args.job_max_attempts == 0 {
            return Err(RefresherError::RunCommandError("Job max attempts must be at least 1".to_string()));
        }

        let denylisted_contracts = args
            .denylisted_contracts
            .iter()
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Address::from_str(raw).map_err(|e| {
                    RefresherError::RunCommandError(format!("Invalid denylisted contract {raw:?}: {e}"))
                })
            })
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self {
            method: method.to_string(),
            parallel_fanout_limit: args.parallel_fanout_limit,
            per_request_page_count: args.per_request_page_count,
            denylisted_contracts,
            job_timeout: Duration::from_secs(args.job_timeout_secs),
            job_max_attempts: args.job_max_attempts,
            job_retry_delay: Duration::from_secs(args.job_retry_delay_secs),
        })
    }
}
