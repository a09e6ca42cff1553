use super::messages::{CollectionMetadataUpdateMessage, CollectionRefreshMessage, MetadataWriteMessage};
use super::{DispatchError, RefreshDispatcher};
use crate::core::client::queue::QueueClient;
use crate::types::queue::QueueType;
use crate::types::MetadataItem;
use alloy_primitives::Address;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Items per `metadata_write` message, keeps each message well under the SQS payload limit.
pub const METADATA_WRITE_CHUNK_SIZE: usize = 50;

/// Dispatcher publishing every side effect as a JSON message on its own queue.
pub struct QueueDispatcher {
    queue: Arc<dyn QueueClient>,
}

impl QueueDispatcher {
    pub fn new(queue: Arc<dyn QueueClient>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl RefreshDispatcher for QueueDispatcher {
    async fn request_full_collection_refresh(&self, contract: Address, method: &str) -> Result<(), DispatchError> {
        let message = CollectionRefreshMessage::FullCollection { contract, method: method.to_string() };
        self.queue.send_message(QueueType::CollectionRefresh, serde_json::to_string(&message)?, None).await?;
        debug!(%contract, method, "Requested full collection refresh");
        Ok(())
    }

    async fn request_collection_metadata_update(
        &self,
        contract: Address,
        representative_token_id: &str,
        method: &str,
        priority: u32,
    ) -> Result<(), DispatchError> {
        let message = CollectionMetadataUpdateMessage {
            contract,
            token_id: representative_token_id.to_string(),
            method: method.to_string(),
            priority,
        };
        self.queue.send_message(QueueType::CollectionMetadataUpdate, serde_json::to_string(&message)?, None).await?;
        debug!(%contract, token_id = representative_token_id, method, "Requested collection metadata update");
        Ok(())
    }

    async fn submit_fetched_metadata(&self, items: Vec<MetadataItem>) -> Result<(), DispatchError> {
        let total = items.len();
        for chunk in items.chunks(METADATA_WRITE_CHUNK_SIZE) {
            let message = MetadataWriteMessage { items: chunk.to_vec() };
            self.queue.send_message(QueueType::MetadataWrite, serde_json::to_string(&message)?, None).await?;
        }
        debug!(items = total, "Submitted fetched metadata");
        Ok(())
    }
}
