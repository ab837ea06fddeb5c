//! Product Search Sync - Main entry point
//!
//! Runs the MCP server that applies product change events to the search index
//! and answers product searches from the index and the primary store.

use anyhow::Result;
use product_search_sync::client::{
    AsyncIndexClient, AsyncIndexClientImpl, AsyncStoreClient, AsyncStoreClientImpl,
};
use product_search_sync::repositories::{
    AlgoliaIndexRepository, FirestoreProductRepository, ProductRepository, SearchIndexRepository,
};
use product_search_sync::config::log_filter;
use product_search_sync::{Config, IndexClient, Metrics, ProductSearchServer, StoreClient};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Logging goes to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            config.as_ref().ok().map(|cfg| cfg.log_level.as_str()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Product Search Sync with index {} at {} and store {}",
        config.index_name, config.index_api_url, config.store_api_url
    );

    // Both clients report into one set of counters
    let metrics = Metrics::new();

    let index_client = Arc::new(AsyncIndexClientImpl::new(IndexClient::new(
        &config,
        metrics.clone(),
    ))) as Arc<dyn AsyncIndexClient>;
    let store_client = Arc::new(AsyncStoreClientImpl::new(StoreClient::new(
        &config,
        metrics.clone(),
    ))) as Arc<dyn AsyncStoreClient>;

    let index_repo =
        Arc::new(AlgoliaIndexRepository::new(index_client)) as Arc<dyn SearchIndexRepository>;
    let product_repo = Arc::new(FirestoreProductRepository::new(
        store_client,
        config.store_batch_limit,
    )) as Arc<dyn ProductRepository>;

    let server = ProductSearchServer::new(index_repo, product_repo, config.store_fetch_concurrency);

    info!(
        "Store batch limit: {}, fetch concurrency: {}, hits per page: {}",
        config.store_batch_limit, config.store_fetch_concurrency, config.search_hits_per_page
    );

    info!("Starting MCP server with stdio transport");
    let result = product_search_sync::server::run_server(server).await;

    let summary = metrics.summary();
    info!(
        http_requests = summary.http_requests_total,
        http_errors = summary.http_errors_total,
        index_writes = summary.index_writes_total,
        index_deletes = summary.index_deletes_total,
        index_searches = summary.index_searches_total,
        records_fetched = summary.records_fetched_total,
        "Metrics at shutdown"
    );

    result?;
    info!("Product Search Sync shutdown complete");
    Ok(())
}
