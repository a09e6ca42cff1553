use super::{BacklogError, RefreshBacklog};
use crate::core::client::database::constant::PENDING_REFRESH_COLLECTION;
use crate::core::client::database::MongoDbClient;
use crate::types::RefreshRequest;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::options::FindOneAndDeleteOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Stored form of a pending request.
///
/// `rank` orders the backlog: non-prioritized requests get the enqueue time in microseconds,
/// prioritized ones its negation, so the newest prioritized request sorts first and plain requests
/// keep arrival order.
#[derive(Debug, Serialize, Deserialize)]
struct PendingRefreshDocument {
    #[serde(flatten)]
    request: RefreshRequest,
    prioritized: bool,
    rank: i64,
}

pub struct MongoRefreshBacklog {
    collection: Collection<PendingRefreshDocument>,
}

impl MongoRefreshBacklog {
    pub async fn new(client: &MongoDbClient) -> Result<Self, BacklogError> {
        let collection = client.collection::<PendingRefreshDocument>(PENDING_REFRESH_COLLECTION);
        collection.create_index(IndexModel::builder().keys(doc! { "rank": 1 }).build(), None).await?;
        Ok(Self { collection })
    }

    fn rank(prioritized: bool) -> i64 {
        let now = Utc::now().timestamp_micros();
        if prioritized {
            -now
        } else {
            now
        }
    }
}

#[async_trait]
impl RefreshBacklog for MongoRefreshBacklog {
    async fn get(&self, count: usize) -> Result<Vec<RefreshRequest>, BacklogError> {
        let options = FindOneAndDeleteOptions::builder().sort(doc! { "rank": 1, "_id": 1 }).build();
        let mut requests = Vec::with_capacity(count);

        // Each pop is its own atomic find-and-delete, two consumers never receive the same document.
        while requests.len() < count {
            match self.collection.find_one_and_delete(doc! {}, options.clone()).await? {
                Some(document) => requests.push(document.request),
                None => break,
            }
        }

        trace!(requested = count, popped = requests.len(), "Popped pending refresh requests");
        Ok(requests)
    }

    async fn add(&self, request: RefreshRequest, prioritized: bool) -> Result<(), BacklogError> {
        debug!(slug = %request.slug, contract = %request.contract, prioritized, "Adding pending refresh request");
        let document = PendingRefreshDocument { request, prioritized, rank: Self::rank(prioritized) };
        self.collection.insert_one(document, None).await?;
        Ok(())
    }

    async fn len(&self) -> Result<u64, BacklogError> {
        Ok(self.collection.count_documents(doc! {}, None).await?)
    }
}
