//! Backend abstraction over a named collection of items.

use crate::item::Item;
use crate::record::RawRecord;
use async_trait::async_trait;
use errors::AdapterError;
use std::sync::Arc;

/// Storage backend holding named collections.
///
/// Implementations must build write payloads through
/// [`crate::DocumentBody::from_item`] so absent optional fields never reach
/// the backend.
#[async_trait]
pub trait CollectionAdapter: Send + Sync {
    /// Short backend name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Lists every record of `collection`.
    ///
    /// A collection with no documents, including one that was never written,
    /// is an empty vector rather than an error.
    async fn list_all(&self, collection: &str) -> Result<Vec<RawRecord>, AdapterError>;

    /// Deletes every record of `collection` and inserts `items` as one
    /// logical transaction.
    ///
    /// On failure the stored collection may hold the old contents, the new
    /// contents, or anything in between; the previous state is not restored.
    async fn replace_all(&self, collection: &str, items: &[Item]) -> Result<(), AdapterError>;
}

#[async_trait]
impl<A: CollectionAdapter + ?Sized> CollectionAdapter for Arc<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<RawRecord>, AdapterError> {
        (**self).list_all(collection).await
    }

    async fn replace_all(&self, collection: &str, items: &[Item]) -> Result<(), AdapterError> {
        (**self).replace_all(collection, items).await
    }
}
