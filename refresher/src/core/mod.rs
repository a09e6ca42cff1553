pub mod client;
pub mod config;

pub use client::{LockClient, MetadataFetcher, QueueClient, RefreshBacklog, RefreshDispatcher, TokenDirectory};
