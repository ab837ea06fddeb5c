//! Index synchronization service.
//!
//! Applies product change events to the search index: creates and updates are
//! projected and upserted, deletes remove the entry. Every invocation makes
//! exactly one index call and keeps no state, so redelivered or reordered events
//! converge through the index's last-write-wins semantics.

use crate::domain::ProductId;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{ChangeEvent, Product};
use crate::projection::project;
use crate::repositories::SearchIndexRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Index synchronization operations, one per change event variant.
#[async_trait]
pub trait SyncService: Send + Sync {
    /// Project a newly created product and upsert it.
    async fn on_created(&self, record: &Product) -> ServiceResult<()>;

    /// Project the post-change snapshot of a product and upsert it.
    async fn on_updated(&self, after: &Product) -> ServiceResult<()>;

    /// Remove the entry for a deleted product. Succeeds if it is already gone.
    async fn on_deleted(&self, record_id: &ProductId) -> ServiceResult<()>;

    /// Dispatch a delivered change event to the matching operation.
    async fn apply(&self, event: ChangeEvent) -> ServiceResult<()>;
}

/// Default implementation of SyncService.
pub struct IndexSynchronizer {
    index: Arc<dyn SearchIndexRepository>,
}

impl IndexSynchronizer {
    /// Create a new synchronizer writing to the given index.
    pub fn new(index: Arc<dyn SearchIndexRepository>) -> Self {
        Self { index }
    }

    async fn upsert(&self, record: &Product, event: &'static str) -> ServiceResult<()> {
        if record.id.is_empty() {
            return Err(ServiceError::InvalidEvent(format!(
                "{} product has no id",
                event
            )));
        }

        let entry = project(record);
        match self.index.upsert(&entry).await {
            Ok(()) => {
                info!(object_id = %entry.object_id, event, "Index entry upserted");
                Ok(())
            }
            Err(e) => {
                let err = ServiceError::IndexUnavailable(e);
                warn!(
                    object_id = %entry.object_id,
                    event,
                    retryable = err.is_retryable(),
                    "Index upsert failed: {}",
                    err
                );
                Err(err)
            }
        }
    }
}

/// Bind the event's record id onto its snapshot.
///
/// The id in the event comes from the document path and wins over whatever id the
/// snapshot body carries.
fn bind_snapshot(record_id: &ProductId, record: Product) -> Product {
    if !record.id.is_empty() && record.id != record_id.as_str() {
        warn!(
            record_id = %record_id,
            snapshot_id = %record.id,
            "Snapshot id disagrees with event record id; using record id"
        );
    }
    record.with_id(record_id)
}

#[async_trait]
impl SyncService for IndexSynchronizer {
    async fn on_created(&self, record: &Product) -> ServiceResult<()> {
        self.upsert(record, "created").await
    }

    async fn on_updated(&self, after: &Product) -> ServiceResult<()> {
        self.upsert(after, "updated").await
    }

    async fn on_deleted(&self, record_id: &ProductId) -> ServiceResult<()> {
        match self.index.delete(record_id.as_str()).await {
            Ok(()) => {
                info!(object_id = %record_id, "Index entry deleted");
                Ok(())
            }
            Err(e) => {
                let err = ServiceError::IndexUnavailable(e);
                warn!(
                    object_id = %record_id,
                    retryable = err.is_retryable(),
                    "Index delete failed: {}",
                    err
                );
                Err(err)
            }
        }
    }

    async fn apply(&self, event: ChangeEvent) -> ServiceResult<()> {
        match event {
            ChangeEvent::Created { record_id, record } => {
                self.on_created(&bind_snapshot(&record_id, record)).await
            }
            ChangeEvent::Updated { record_id, record } => {
                self.on_updated(&bind_snapshot(&record_id, record)).await
            }
            ChangeEvent::Deleted { record_id } => self.on_deleted(&record_id).await,
        }
    }
}
