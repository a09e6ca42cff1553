use super::TokenDirectory;
use crate::core::client::database::constant::TOKENS_COLLECTION;
use crate::core::client::database::{DatabaseError, MongoDbClient};
use alloy_primitives::Address;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::FindOneOptions;
use mongodb::Collection;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Projection of an indexed token, only the fields the refresher reads.
#[derive(Debug, Serialize, Deserialize)]
struct TokenDocument {
    token_id: String,
}

/// Token directory reading the `tokens` collection maintained by the indexer.
///
/// Contracts are stored as lowercase hex strings.
pub struct MongoTokenDirectory {
    collection: Collection<TokenDocument>,
}

impl MongoTokenDirectory {
    pub fn new(client: &MongoDbClient) -> Self {
        Self { collection: client.collection::<TokenDocument>(TOKENS_COLLECTION) }
    }
}

#[async_trait]
impl TokenDirectory for MongoTokenDirectory {
    async fn representative_token(
        &self,
        contract: Address,
        collection: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let filter = doc! { "contract": format!("{contract:#x}"), "collection_id": collection };
        let options =
            FindOneOptions::builder().projection(doc! { "token_id": 1, "_id": 0 }).sort(doc! { "token_id": 1 }).build();

        let token = self.collection.find_one(filter, options).await?.map(|document| document.token_id);
        trace!(%contract, collection, token = ?token, "Looked up representative token");
        Ok(token)
    }
}
