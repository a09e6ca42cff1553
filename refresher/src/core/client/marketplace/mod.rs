pub mod error;
pub mod http;
pub mod types;

use crate::types::FetchPage;
use alloy_primitives::Address;
use async_trait::async_trait;
pub use error::FetchError;

/// Black-box access to the external metadata provider.
///
/// One call fetches one page for one slug. Implementations never retry: rate limits and failures
/// are reported to the caller, which owns the retry policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(
        &self,
        contract: Address,
        slug: &str,
        method: &str,
        continuation: Option<String>,
    ) -> Result<FetchPage, FetchError>;
}
