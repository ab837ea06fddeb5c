use crate::client::AsyncStoreClient;
use crate::error::{ClientError, ClientResult};
use crate::models::Product;
use crate::repositories::traits::ProductRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Product repository backed by the document store HTTP API.
///
/// The store caps how many documents one batch read may name; the cap is taken
/// from configuration and enforced here before any request is made.
pub struct FirestoreProductRepository {
    client: Arc<dyn AsyncStoreClient>,
    max_batch_size: usize,
}

impl FirestoreProductRepository {
    /// Create a new FirestoreProductRepository with the given client and batch cap.
    pub fn new(client: Arc<dyn AsyncStoreClient>, max_batch_size: usize) -> Self {
        Self {
            client,
            max_batch_size: max_batch_size.max(1),
        }
    }
}

#[async_trait]
impl ProductRepository for FirestoreProductRepository {
    async fn get_by_ids(&self, ids: &[String]) -> ClientResult<Vec<Product>> {
        if ids.len() > self.max_batch_size {
            return Err(ClientError::InvalidRequest(format!(
                "Batch of {} ids exceeds the limit of {}",
                ids.len(),
                self.max_batch_size
            )));
        }
        self.client.batch_get(ids).await
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}
