//! Client for the primary document store (Firestore REST API shape).

use super::firestore::BatchGetEntry;
use super::{build_url, map_error, read_body};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::Product;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the primary document store.
///
/// Read-only: the service never writes products, it only fetches them by id to
/// hydrate search results.
#[derive(Clone)]
pub struct StoreClient {
    /// REST base URL, e.g. `https://firestore.googleapis.com/v1`
    base_url: String,

    /// Database resource path, e.g. `projects/shop/databases/(default)`
    database: String,

    /// Collection holding products
    collection: String,

    /// Optional bearer token
    access_token: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl StoreClient {
    /// Create a new StoreClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.store_api_url.clone(),
            database: config.store_database.trim_matches('/').to_string(),
            collection: config.store_collection.clone(),
            access_token: config.store_access_token.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a StoreClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, database: String, collection: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            database: database.trim_matches('/').to_string(),
            collection,
            access_token: None,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Set the bearer token sent with every request.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Full resource name of a product document.
    fn document_name(&self, id: &str) -> String {
        format!("{}/documents/{}/{}", self.database, self.collection, id)
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> ClientResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = build_url(&self.base_url, path);

        tracing::debug!("POST {}", url);

        let mut request = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json");
        if let Some(token) = &self.access_token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        match request.send_json(body).map_err(map_error) {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
                timer.complete_with_error();
                Err(e)
            }
        }
    }

    /// Fetch the products with the given ids in one call.
    ///
    /// Ids with no stored document are omitted from the result, as are ids that
    /// cannot name a document in the collection (empty or containing `/`). The
    /// returned order is whatever the store answers with.
    pub fn batch_get(&self, ids: &[String]) -> ClientResult<Vec<Product>> {
        let documents: Vec<String> = ids
            .iter()
            .filter(|id| {
                let valid = !id.is_empty() && !id.contains('/');
                if !valid {
                    tracing::debug!("Skipping id that cannot name a document: {:?}", id);
                }
                valid
            })
            .map(|id| self.document_name(id))
            .collect();

        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::json!({ "documents": documents });

        let path = format!("{}/documents:batchGet", self.database);
        let response = self.post(&path, &body)?;
        let body = read_body(response)?;

        let entries: Vec<BatchGetEntry> =
            serde_json::from_str(&body).map_err(ClientError::JsonError)?;

        let mut products = Vec::with_capacity(entries.len());
        for entry in entries {
            match (entry.found, entry.missing) {
                (Some(document), _) => products.push(document.into_product()),
                (None, Some(missing)) => {
                    tracing::debug!("Document not found in store: {}", missing);
                }
                (None, None) => {}
            }
        }

        self.metrics.record_records_fetched(products.len());
        Ok(products)
    }
}
