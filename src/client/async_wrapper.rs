//! Async wrappers around the synchronous index and store clients.
//!
//! This module provides async interfaces to the blocking clients by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{IndexClient, StoreClient};
use crate::error::{ClientError, ClientResult};
use crate::models::{IndexEntry, Product};
use async_trait::async_trait;
use std::sync::Arc;

/// Async operations against the search index service.
#[async_trait]
pub trait AsyncIndexClient: Send + Sync {
    async fn save_object(&self, entry: &IndexEntry) -> ClientResult<()>;
    async fn delete_object(&self, object_id: &str) -> ClientResult<()>;
    async fn search(&self, query: &str) -> ClientResult<Vec<String>>;
}

/// Async operations against the primary document store.
#[async_trait]
pub trait AsyncStoreClient: Send + Sync {
    async fn batch_get(&self, ids: &[String]) -> ClientResult<Vec<Product>>;
}

fn join_error(e: tokio::task::JoinError) -> ClientError {
    ClientError::HttpError(format!("Task join error: {}", e))
}

/// Async wrapper around the synchronous [`IndexClient`].
#[derive(Clone)]
pub struct AsyncIndexClientImpl {
    client: Arc<IndexClient>,
}

impl AsyncIndexClientImpl {
    pub fn new(client: IndexClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncIndexClient for AsyncIndexClientImpl {
    async fn save_object(&self, entry: &IndexEntry) -> ClientResult<()> {
        let client = self.client.clone();
        let entry = entry.clone();

        tokio::task::spawn_blocking(move || client.save_object(&entry))
            .await
            .map_err(join_error)?
    }

    async fn delete_object(&self, object_id: &str) -> ClientResult<()> {
        let client = self.client.clone();
        let object_id = object_id.to_string();

        tokio::task::spawn_blocking(move || client.delete_object(&object_id))
            .await
            .map_err(join_error)?
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<String>> {
        let client = self.client.clone();
        let query = query.to_string();

        tokio::task::spawn_blocking(move || client.search(&query))
            .await
            .map_err(join_error)?
    }
}

/// Async wrapper around the synchronous [`StoreClient`].
#[derive(Clone)]
pub struct AsyncStoreClientImpl {
    client: Arc<StoreClient>,
}

impl AsyncStoreClientImpl {
    pub fn new(client: StoreClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncStoreClient for AsyncStoreClientImpl {
    async fn batch_get(&self, ids: &[String]) -> ClientResult<Vec<Product>> {
        let client = self.client.clone();
        let ids = ids.to_vec();

        tokio::task::spawn_blocking(move || client.batch_get(&ids))
            .await
            .map_err(join_error)?
    }
}
