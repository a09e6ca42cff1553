use crate::types::MetadataItem;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Payload of the `collection_refresh` queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CollectionRefreshMessage {
    FullCollection { contract: Address, method: String },
}

/// Payload of the `collection_metadata_update` queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadataUpdateMessage {
    pub contract: Address,
    pub token_id: String,
    pub method: String,
    pub priority: u32,
}

/// Payload of the `metadata_write` queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataWriteMessage {
    pub items: Vec<MetadataItem>,
}
