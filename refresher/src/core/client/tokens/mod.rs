pub mod mongodb;

use crate::core::client::database::DatabaseError;
use alloy_primitives::Address;
use async_trait::async_trait;

/// Read access to the indexed tokens of a collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenDirectory: Send + Sync {
    /// Any one token id of `collection`, used to address collection level metadata updates.
    ///
    /// `None` when no token of the collection has been indexed yet.
    async fn representative_token(&self, contract: Address, collection: &str)
        -> Result<Option<String>, DatabaseError>;
}
