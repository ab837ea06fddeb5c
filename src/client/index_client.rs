//! Client for the hosted search index (Algolia REST API shape).

use super::{build_url, map_error, read_body};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::IndexEntry;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Response body of an index query.
#[derive(Debug, Deserialize)]
struct IndexQueryResponse {
    /// Hits in rank order
    hits: Vec<IndexHit>,

    /// Total matches across all pages
    #[serde(default, rename = "nbHits")]
    nb_hits: usize,
}

/// A single ranked hit. Only the object id is requested.
#[derive(Debug, Deserialize)]
struct IndexHit {
    #[serde(rename = "objectID")]
    object_id: String,
}

/// HTTP client for the search index service.
///
/// Writes are keyed by object id: saving an object replaces any previous object
/// with the same id, and deleting is keyed the same way.
#[derive(Clone)]
pub struct IndexClient {
    /// Base URL of the index service
    base_url: String,

    /// Application id header value
    app_id: String,

    /// API key header value
    api_key: String,

    /// Target index name
    index_name: String,

    /// Hits requested per query
    hits_per_page: usize,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl IndexClient {
    /// Create a new IndexClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.index_api_url.clone(),
            app_id: config.index_app_id.clone(),
            api_key: config.index_api_key.clone(),
            index_name: config.index_name.clone(),
            hits_per_page: config.search_hits_per_page,
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create an IndexClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(
        base_url: String,
        app_id: String,
        api_key: String,
        index_name: String,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            app_id,
            api_key,
            index_name,
            hits_per_page: 20,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn index_path(&self) -> String {
        format!("/1/indexes/{}", urlencoding::encode(&self.index_name))
    }

    fn object_path(&self, object_id: &str) -> String {
        format!("{}/{}", self.index_path(), urlencoding::encode(object_id))
    }

    /// Execute a request with authentication and an optional JSON body.
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ClientResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = build_url(&self.base_url, path);

        tracing::debug!("{} {}", method, url);

        let request = self
            .agent
            .request(method, &url)
            .set("X-Algolia-Application-Id", &self.app_id)
            .set("X-Algolia-API-Key", &self.api_key)
            .set("Content-Type", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(map_error);

        match result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {:?}", method, url, e);
                timer.complete_with_error();
                Err(e)
            }
        }
    }

    /// Create or replace the object with `entry.object_id`.
    pub fn save_object(&self, entry: &IndexEntry) -> ClientResult<()> {
        if entry.object_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "Cannot save an object without an objectID".to_string(),
            ));
        }

        let body = serde_json::to_value(entry).map_err(ClientError::JsonError)?;
        self.send("PUT", &self.object_path(&entry.object_id), Some(&body))?;

        self.metrics.record_index_write();
        Ok(())
    }

    /// Delete the object with the given id.
    ///
    /// The index service answers a delete of an unknown object with success, but a
    /// `404` (for example on a not-yet-created index) is surfaced as
    /// `ClientError::NotFound` for the caller to interpret.
    pub fn delete_object(&self, object_id: &str) -> ClientResult<()> {
        if object_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "Cannot delete an object without an objectID".to_string(),
            ));
        }

        self.send("DELETE", &self.object_path(object_id), None)?;

        self.metrics.record_index_delete();
        Ok(())
    }

    /// Run a query and return the matching object ids in rank order.
    pub fn search(&self, query: &str) -> ClientResult<Vec<String>> {
        let body = serde_json::json!({
            "query": query,
            "hitsPerPage": self.hits_per_page,
            "attributesToRetrieve": ["objectID"],
        });

        let path = format!("{}/query", self.index_path());
        let response = self.send("POST", &path, Some(&body))?;
        let body = read_body(response)?;

        let parsed: IndexQueryResponse =
            serde_json::from_str(&body).map_err(ClientError::JsonError)?;

        tracing::debug!(
            "Index query returned {} hits ({} total matches)",
            parsed.hits.len(),
            parsed.nb_hits
        );

        self.metrics.record_index_search();
        Ok(parsed.hits.into_iter().map(|hit| hit.object_id).collect())
    }
}
