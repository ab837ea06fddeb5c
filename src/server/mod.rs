//! MCP server for product search and index synchronization.
//!
//! Exposes the change-trigger tools and the search tool over the Model
//! Context Protocol.

pub mod handlers;

pub use handlers::ProductSearchServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server with stdio transport until the client disconnects.
///
/// # Arguments
/// * `server` - The configured ProductSearchServer instance
pub async fn run_server(server: ProductSearchServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
