//! Application service layer.
//!
//! Services hold the core logic and sit between the MCP handlers and the
//! repositories: the synchronizer keeps the search index in step with the
//! primary store, the query executor answers searches from both.

mod query_service;
mod sync_service;

pub use query_service::{
    dedupe_ranked, reassemble, FederatedQueryExecutor, QueryService, SearchResponse, SearchResult,
};
pub use sync_service::{IndexSynchronizer, SyncService};
