pub mod error;
pub mod messages;
pub mod queue;

use crate::types::MetadataItem;
use alloy_primitives::Address;
use async_trait::async_trait;
pub use error::DispatchError;

/// Outbound, fire-and-forget side effects of the scheduler.
///
/// Delivery is at-least-once; every consumer downstream is idempotent per item.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshDispatcher: Send + Sync {
    /// Ask for every token of the collection behind `contract` to be re-crawled.
    async fn request_full_collection_refresh(&self, contract: Address, method: &str) -> Result<(), DispatchError>;

    /// Ask for the collection level metadata to be refreshed through `representative_token_id`.
    async fn request_collection_metadata_update(
        &self,
        contract: Address,
        representative_token_id: &str,
        method: &str,
        priority: u32,
    ) -> Result<(), DispatchError>;

    /// Hand fetched metadata to the write pipeline.
    async fn submit_fetched_metadata(&self, items: Vec<MetadataItem>) -> Result<(), DispatchError>;
}
