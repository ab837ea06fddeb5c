//! Product Search Sync - keeps a product search index in step with the primary
//! document store and answers searches with authoritative records.
//!
//! Product records live in a document store; a separate search index holds a
//! projection of each record for ranking. Change events from the store are
//! applied to the index, and queries are answered by searching the index and
//! hydrating the ranked ids from the store.
//!
//! # Architecture
//!
//! - **models**: Product records, index entries and change events
//! - **domain**: Validated value objects
//! - **projection**: Record to index entry mapping
//! - **error**: Client, service and configuration errors
//! - **config**: Configuration from environment variables
//! - **client**: HTTP clients for the search index and the document store
//! - **repositories**: Async data access traits and their HTTP implementations
//! - **services**: Index synchronizer and federated query executor
//! - **metrics**: Request and sync counters
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod projection;
pub mod repositories;
pub mod server;
pub mod services;

pub use client::{IndexClient, StoreClient};
pub use config::Config;
pub use domain::{ProductId, ValidationError};
pub use error::{ClientError, ConfigError, ServiceError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ChangeEvent, IndexEntry, Product};
pub use projection::project;
pub use server::ProductSearchServer;
pub use services::{
    FederatedQueryExecutor, IndexSynchronizer, QueryService, SearchResponse, SearchResult,
    SyncService,
};
