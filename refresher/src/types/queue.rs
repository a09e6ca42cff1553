use strum_macros::{Display, EnumIter};

/// Queues the refresher produces to or consumes from.
///
/// The display form is substituted into the queue identifier template (`mr_{}_queue` by default).
#[derive(Display, Debug, Clone, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    /// Delayed self-triggers of the batch scheduler
    #[strum(serialize = "refresh_trigger")]
    RefreshTrigger,
    /// Fully fetched token metadata waiting to be written
    #[strum(serialize = "metadata_write")]
    MetadataWrite,
    /// Requests to re-crawl every token of a collection
    #[strum(serialize = "collection_refresh")]
    CollectionRefresh,
    /// Requests to refresh the collection level metadata
    #[strum(serialize = "collection_metadata_update")]
    CollectionMetadataUpdate,
}
