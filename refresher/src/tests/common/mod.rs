
use crate::types::{FetchPage, MetadataItem, RefreshRequest};
use alloy_primitives::{address, Address};

pub const METHOD: &str = "opensea";
pub const BAYC: Address = address!("bc4ca0eda7647a8ab7c2061c2e118a18a936f13d");
pub const AZUKI: Address = address!("ed5af388653567af2f388e6224dc7c4b3241c544");
pub const DOODLES: Address = address!("8a90cab2b38dba80c64b7734e58ee1db38b8992e");
pub const DENYLISTED: Address = address!("82c7a8f707110f5fbb16184a5933e9f78a34c6ab");

pub fn request(slug: &str, contract: Address) -> RefreshRequest {
    RefreshRequest::new(slug, contract, format!("{slug}-collection"))
}

pub fn metadata(contract: Address, token_id: &str) -> MetadataItem {
    MetadataItem {
        contract,
        token_id: token_id.to_string(),
        collection: None,
        slug: None,
        name: Some(format!("#{token_id}")),
        description: None,
        image_url: None,
        media_url: None,
        attributes: serde_json::Value::Array(vec![]),
    }
}

pub fn page(contract: Address, token_ids: &[&str], continuation: Option<&str>) -> FetchPage {
    FetchPage {
        metadata: token_ids.iter().map(|id| metadata(contract, id)).collect(),
        continuation: continuation.map(str::to_string),
    }
}
