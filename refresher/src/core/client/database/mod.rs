pub mod constant;
pub mod error;

pub use error::DatabaseError;

use crate::types::params::database::MongoConfig;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use std::sync::Arc;
use tracing::debug;

/// Shared MongoDB handle used by the backlog, the lock and the token directory.
#[derive(Clone, Debug)]
pub struct MongoDbClient {
    database: Arc<Database>,
}

impl MongoDbClient {
    pub async fn setup(config: &MongoConfig) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&config.connection_url).await?;
        let database = Arc::new(client.database(&config.database_name));
        debug!(database = %config.database_name, "Connected to MongoDB");
        Ok(Self { database })
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Round trip to the server, used at startup.
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
