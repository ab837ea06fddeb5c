use crate::error::ClientResult;
use crate::models::{IndexEntry, Product};
use async_trait::async_trait;

/// Repository over the external search index.
///
/// Writes are keyed by object id with last-write-wins semantics, so independent
/// callers may write different keys concurrently without coordination.
#[async_trait]
pub trait SearchIndexRepository: Send + Sync {
    /// Create or overwrite the entry with `entry.object_id`.
    async fn upsert(&self, entry: &IndexEntry) -> ClientResult<()>;

    /// Remove the entry with the given object id. Removing an absent entry succeeds.
    async fn delete(&self, object_id: &str) -> ClientResult<()>;

    /// Object ids matching the query, in the index's rank order.
    async fn search(&self, query: &str) -> ClientResult<Vec<String>>;
}

/// Repository over the primary product store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch the products with the given ids.
    ///
    /// At most [`max_batch_size`](Self::max_batch_size) ids may be passed per call.
    /// Ids without a stored product are omitted; the result order is unspecified.
    async fn get_by_ids(&self, ids: &[String]) -> ClientResult<Vec<Product>>;

    /// Largest id set accepted by one [`get_by_ids`](Self::get_by_ids) call.
    fn max_batch_size(&self) -> usize;
}
