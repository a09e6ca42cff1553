// Client abstractions module - contains all client interface traits

pub mod backlog;
pub mod database;
pub mod dispatch;
pub mod lock;
pub mod marketplace;
pub mod queue;
pub mod tokens;

// Re-export commonly used types
pub use backlog::{memory::InMemoryRefreshBacklog, mongodb::MongoRefreshBacklog, RefreshBacklog};
pub use database::MongoDbClient;
pub use dispatch::{queue::QueueDispatcher, RefreshDispatcher};
pub use lock::{memory::InMemoryLockClient, mongodb::MongoLockClient, LockClient};
pub use marketplace::{http::HttpMetadataFetcher, MetadataFetcher};
pub use queue::{sqs::SQS, QueueClient};
pub use tokens::{mongodb::MongoTokenDirectory, TokenDirectory};
