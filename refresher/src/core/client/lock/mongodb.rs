use super::{LockClient, LockError};
use crate::core::client::database::constant::LOCKS_COLLECTION;
use crate::core::client::database::{DatabaseError, MongoDbClient};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use mongodb::bson::{doc, DateTime};
use mongodb::options::UpdateOptions;
use mongodb::Collection;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Serialize, Deserialize)]
struct LockDocument {
    #[serde(rename = "_id")]
    key: String,
    expires_at: DateTime,
}

/// MongoDB backed lock, one document per key.
///
/// Exclusivity rests on the unique `_id`: an acquire upserts only when the stored lock is expired,
/// so a concurrent acquire of a live lock fails with a duplicate key error.
pub struct MongoLockClient {
    collection: Collection<LockDocument>,
}

impl MongoLockClient {
    pub fn new(client: &MongoDbClient) -> Self {
        Self { collection: client.collection::<LockDocument>(LOCKS_COLLECTION) }
    }

    fn expiry(expiry_seconds: u64) -> DateTime {
        DateTime::from_chrono(Utc::now() + Duration::seconds(expiry_seconds as i64))
    }
}

#[async_trait]
impl LockClient for MongoLockClient {
    async fn acquire_lock(&self, key: &str, expiry_seconds: u64) -> Result<bool, LockError> {
        let now = DateTime::now();
        let filter = doc! { "_id": key, "expires_at": { "$lte": now } };
        let update = doc! { "$set": { "expires_at": Self::expiry(expiry_seconds) } };
        let options = UpdateOptions::builder().upsert(true).build();

        match self.collection.update_one(filter, update, options).await {
            Ok(result) => {
                let acquired = result.modified_count == 1 || result.upserted_id.is_some();
                debug!(key, acquired, "Lock acquisition attempted");
                Ok(acquired)
            }
            Err(err) => {
                let err = DatabaseError::from(err);
                if err.is_duplicate_key() {
                    trace!(key, "Lock already held");
                    Ok(false)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    async fn extend_lock(&self, key: &str, expiry_seconds: u64) -> Result<bool, LockError> {
        let filter = doc! { "_id": key, "expires_at": { "$gt": DateTime::now() } };
        let update = doc! { "$set": { "expires_at": Self::expiry(expiry_seconds) } };
        let result = self.collection.update_one(filter, update, None).await?;
        debug!(key, expiry_seconds, extended = result.matched_count == 1, "Lock extension attempted");
        Ok(result.matched_count == 1)
    }

    async fn release_lock(&self, key: &str) -> Result<(), LockError> {
        self.collection.delete_one(doc! { "_id": key }, None).await?;
        debug!(key, "Lock released");
        Ok(())
    }

    async fn is_locked(&self, key: &str) -> Result<bool, LockError> {
        let filter = doc! { "_id": key, "expires_at": { "$gt": DateTime::now() } };
        Ok(self.collection.find_one(filter, None).await?.is_some())
    }
}
