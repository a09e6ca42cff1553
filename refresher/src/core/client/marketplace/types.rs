use alloy_primitives::Address;
use serde::Deserialize;

/// Body of a successful `GET /collection/{slug}/nfts` call.
#[derive(Debug, Deserialize)]
pub struct ProviderNftsResponse {
    #[serde(default)]
    pub nfts: Vec<ProviderNft>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderNft {
    pub identifier: String,
    #[serde(default)]
    pub contract: Option<Address>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub animation_url: Option<String>,
    #[serde(default)]
    pub traits: serde_json::Value,
}

/// Body of a 429 response. Only the back-off hint is of interest.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderRateLimitResponse {
    #[serde(default)]
    pub expires_in: Option<u64>,
}
