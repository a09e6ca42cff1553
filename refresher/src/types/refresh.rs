use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// A pending request to refresh the metadata of one collection, keyed by its provider slug.
///
/// A request carrying a `continuation` resumes a page sequence that was already started for the
/// same `(slug, contract, collection)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub slug: String,
    pub contract: Address,
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

impl RefreshRequest {
    pub fn new(slug: impl Into<String>, contract: Address, collection: impl Into<String>) -> Self {
        Self { slug: slug.into(), contract, collection: collection.into(), continuation: None }
    }

    /// Same request, resuming from `continuation`.
    pub fn with_continuation(&self, continuation: impl Into<String>) -> Self {
        Self { continuation: Some(continuation.into()), ..self.clone() }
    }
}

/// Metadata of a single token as returned by the marketplace provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub contract: Address,
    pub token_id: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// One page of provider results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchPage {
    pub metadata: Vec<MetadataItem>,
    pub continuation: Option<String>,
}

impl FetchPage {
    /// An empty page without continuation means the slug resolved to nothing.
    pub fn is_unresolvable(&self) -> bool {
        self.metadata.is_empty() && self.continuation.is_none()
    }
}
