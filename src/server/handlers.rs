//! MCP tool handlers for the product search server.
//!
//! Change triggers and search queries both arrive as MCP tool calls.

use crate::domain::ProductId;
use crate::error::ServiceError;
use crate::models::{ChangeEvent, Product};
use crate::repositories::{ProductRepository, SearchIndexRepository};
use crate::services::{
    FederatedQueryExecutor, IndexSynchronizer, QueryService, SyncService,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// MCP server exposing index synchronization and federated search.
#[derive(Clone)]
pub struct ProductSearchServer {
    sync_service: Arc<dyn SyncService>,
    query_service: Arc<dyn QueryService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for ProductSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "product-search-sync".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Keeps the product search index in sync with the primary store and answers product searches with authoritative, rank-ordered records.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchProductsParams {
    query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ProductChangeParams {
    product_id: String,
    /// Product snapshot as stored in the primary store
    product: serde_json::Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ProductDeletedParams {
    product_id: String,
}

fn invalid_params(message: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message.to_string()),
        data: None,
    }
}

fn internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Map a service failure to an MCP error carrying its retry classification.
pub(crate) fn to_mcp_error(e: ServiceError) -> McpError {
    let code = if e.is_retryable() {
        ErrorCode::INTERNAL_ERROR
    } else {
        ErrorCode::INVALID_PARAMS
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: Some(serde_json::json!({
            "kind": e.kind(),
            "retryable": e.is_retryable(),
        })),
    }
}

fn parse_change(params: ProductChangeParams) -> Result<(ProductId, Product), McpError> {
    let record_id = ProductId::new(params.product_id).map_err(invalid_params)?;
    let record: Product = serde_json::from_value(params.product)
        .map_err(|e| invalid_params(format!("Invalid product snapshot: {}", e)))?;
    Ok((record_id, record))
}

fn acknowledged(event: &ChangeEvent) -> Result<CallToolResult, McpError> {
    let response = serde_json::json!({
        "event": event.kind(),
        "product_id": event.record_id().as_str(),
        "status": "applied",
    });

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&response).map_err(internal_error)?,
    )]))
}

#[tool_router]
impl ProductSearchServer {
    /// Create a new server over the given index and store repositories.
    pub fn new(
        index_repo: Arc<dyn SearchIndexRepository>,
        product_repo: Arc<dyn ProductRepository>,
        fetch_concurrency: usize,
    ) -> Self {
        let sync_service =
            Arc::new(IndexSynchronizer::new(index_repo.clone())) as Arc<dyn SyncService>;
        let query_service = Arc::new(FederatedQueryExecutor::new(
            index_repo,
            product_repo,
            fetch_concurrency,
        )) as Arc<dyn QueryService>;

        Self {
            sync_service,
            query_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Search products and return authoritative records in rank order.
    #[tool(
        description = "Search products by free text. Returns the matching products as stored in the primary store, in search rank order. Deleted products are omitted."
    )]
    async fn search_products(
        &self,
        params: Parameters<SearchProductsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: search_products called");
        tracing::debug!("Parameters: query={:?}", params.query);

        let response = self
            .query_service
            .search(&params.query)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response.results).map_err(internal_error)?,
        )]))
    }

    #[tool(
        description = "Notify that a product was created. Projects the snapshot and upserts it into the search index."
    )]
    async fn product_created(
        &self,
        params: Parameters<ProductChangeParams>,
    ) -> Result<CallToolResult, McpError> {
        let (record_id, record) = parse_change(params.0)?;
        let event = ChangeEvent::Created { record_id, record };
        tracing::info!("MCP Handler: product_created for {}", event.record_id());

        self.sync_service
            .apply(event.clone())
            .await
            .map_err(to_mcp_error)?;
        acknowledged(&event)
    }

    #[tool(
        description = "Notify that a product was updated. Projects the post-change snapshot and upserts it into the search index."
    )]
    async fn product_updated(
        &self,
        params: Parameters<ProductChangeParams>,
    ) -> Result<CallToolResult, McpError> {
        let (record_id, record) = parse_change(params.0)?;
        let event = ChangeEvent::Updated { record_id, record };
        tracing::info!("MCP Handler: product_updated for {}", event.record_id());

        self.sync_service
            .apply(event.clone())
            .await
            .map_err(to_mcp_error)?;
        acknowledged(&event)
    }

    #[tool(
        description = "Notify that a product was deleted. Removes its entry from the search index; succeeds if the entry is already gone."
    )]
    async fn product_deleted(
        &self,
        params: Parameters<ProductDeletedParams>,
    ) -> Result<CallToolResult, McpError> {
        let record_id = ProductId::new(params.0.product_id).map_err(invalid_params)?;
        let event = ChangeEvent::Deleted { record_id };
        tracing::info!("MCP Handler: product_deleted for {}", event.record_id());

        self.sync_service
            .apply(event.clone())
            .await
            .map_err(to_mcp_error)?;
        acknowledged(&event)
    }
}
