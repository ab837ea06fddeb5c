//! Federated query service.
//!
//! A query is answered in two hops: the search index supplies the ranked object
//! ids, then the primary store supplies the authoritative products. The index's
//! rank order is kept end to end; ids whose product no longer exists are dropped.

use crate::error::{ServiceError, ServiceResult};
use crate::models::Product;
use crate::repositories::{ProductRepository, SearchIndexRepository};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Products in index rank order.
pub type SearchResult = Vec<Product>;

/// Result of a federated query with hydration diagnostics.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    /// Hydrated products, in rank order
    pub results: SearchResult,

    /// Distinct ids returned by the index
    pub candidate_count: usize,

    /// Ids the index returned but the store no longer holds
    pub stale_dropped: usize,

    /// Number of batch fetches issued against the store
    pub chunks_fetched: usize,
}

/// Federated search over the index and the primary store.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Run a free-text query and hydrate the ranked hits.
    ///
    /// The query text is passed to the index as-is. Fails as a whole if either
    /// the index or any store fetch fails; never returns a partial result.
    async fn search(&self, query: &str) -> ServiceResult<SearchResponse>;
}

/// Default implementation of QueryService.
pub struct FederatedQueryExecutor {
    index: Arc<dyn SearchIndexRepository>,
    store: Arc<dyn ProductRepository>,
    /// Maximum store fetches in flight for one query
    fetch_concurrency: usize,
}

impl FederatedQueryExecutor {
    /// Create a new executor.
    ///
    /// # Arguments
    /// * `index` - Search index supplying ranked ids
    /// * `store` - Primary store supplying products
    /// * `fetch_concurrency` - Batch fetches allowed in flight at once (min 1)
    pub fn new(
        index: Arc<dyn SearchIndexRepository>,
        store: Arc<dyn ProductRepository>,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            index,
            store,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }
}

/// Remove repeated ids, keeping each at its first rank position.
pub fn dedupe_ranked(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Arrange fetched products in rank order.
///
/// Returns the ordered products and the ranked ids that had no product. Fetched
/// products that were not ranked are ignored.
pub fn reassemble<'a, I>(ranked: &'a [String], fetched: I) -> (Vec<Product>, Vec<&'a str>)
where
    I: IntoIterator<Item = Product>,
{
    let mut by_id: HashMap<String, Product> = fetched
        .into_iter()
        .map(|product| (product.id.clone(), product))
        .collect();

    let mut results = Vec::with_capacity(ranked.len());
    let mut missing = Vec::new();
    for id in ranked {
        match by_id.remove(id) {
            Some(product) => results.push(product),
            None => missing.push(id.as_str()),
        }
    }

    (results, missing)
}

#[async_trait]
impl QueryService for FederatedQueryExecutor {
    async fn search(&self, query: &str) -> ServiceResult<SearchResponse> {
        let start = Instant::now();

        let hits = self.index.search(query).await.map_err(|e| {
            warn!("Index search failed: {}", e);
            ServiceError::IndexUnavailable(e)
        })?;

        let ranked = dedupe_ranked(hits);
        if ranked.is_empty() {
            debug!("Index returned no hits");
            return Ok(SearchResponse::default());
        }

        let batch_size = self.store.max_batch_size().max(1);
        let chunks: Vec<Vec<String>> = ranked.chunks(batch_size).map(<[String]>::to_vec).collect();
        let chunks_fetched = chunks.len();

        let store = &self.store;
        let fetched: Vec<Vec<Product>> = stream::iter(chunks)
            .map(|chunk| async move { store.get_by_ids(&chunk).await })
            .buffer_unordered(self.fetch_concurrency)
            .try_collect()
            .await
            .map_err(|e| {
                warn!("Store batch fetch failed, failing the whole query: {}", e);
                ServiceError::StoreUnavailable(e)
            })?;

        let (results, missing) = reassemble(&ranked, fetched.into_iter().flatten());
        for id in &missing {
            debug!(object_id = %id, "Dropping index entry with no stored product");
        }

        info!(
            candidates = ranked.len(),
            results = results.len(),
            stale_dropped = missing.len(),
            chunks = chunks_fetched,
            duration_ms = start.elapsed().as_millis() as u64,
            "Search query completed"
        );

        Ok(SearchResponse {
            stale_dropped: missing.len(),
            candidate_count: ranked.len(),
            chunks_fetched,
            results,
        })
    }
}
