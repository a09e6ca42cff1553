pub mod constant;
pub mod params;
pub mod queue;
pub mod refresh;

pub use refresh::{FetchPage, MetadataItem, RefreshRequest};
