use crate::client::AsyncIndexClient;
use crate::error::{ClientError, ClientResult};
use crate::models::IndexEntry;
use crate::repositories::traits::SearchIndexRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Search index repository backed by the hosted index HTTP API.
///
/// Delegates to the AsyncIndexClient and turns a `404` on delete into success,
/// so deleting an entry that is already gone is idempotent.
pub struct AlgoliaIndexRepository {
    client: Arc<dyn AsyncIndexClient>,
}

impl AlgoliaIndexRepository {
    /// Create a new AlgoliaIndexRepository with the given client.
    pub fn new(client: Arc<dyn AsyncIndexClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchIndexRepository for AlgoliaIndexRepository {
    async fn upsert(&self, entry: &IndexEntry) -> ClientResult<()> {
        self.client.save_object(entry).await
    }

    async fn delete(&self, object_id: &str) -> ClientResult<()> {
        match self.client.delete_object(object_id).await {
            Err(ClientError::NotFound(message)) => {
                tracing::debug!(
                    "Index entry {} already absent ({}), treating delete as done",
                    object_id,
                    message
                );
                Ok(())
            }
            other => other,
        }
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<String>> {
        self.client.search(query).await
    }
}
