//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{
    FaviconGetParams, FaviconRefreshParams, FaviconSeedParams, get_impl, refresh_impl, seed_impl,
};
use favicache_core::{AppConfig, Resolver};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for favicache.
#[derive(Clone)]
pub struct FaviconServer {
    resolver: Arc<Resolver>,
    config: Arc<AppConfig>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
#[tool_router]
impl FaviconServer {
    /// Create a new server handler around a shared resolver.
    pub fn new(resolver: Arc<Resolver>, config: Arc<AppConfig>) -> Self {
        Self { resolver, config, tool_router: Self::tool_router() }
    }

    /// Look up a site's favicon, discovering and storing it on a miss.
    #[tool(
        description = "Get the favicon URL for a site. Returns the stored result when present, otherwise discovers and stores it. Output: {favicon_url, error_msg}."
    )]
    async fn favicon_get(&self, params: Parameters<FaviconGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.resolver, params.0).await
    }

    /// Rediscover a site's favicon, overwriting any stored result.
    #[tool(
        description = "Refresh the favicon URL for a site. Always rediscovers and overwrites the stored result. Output: {favicon_url, error_msg}."
    )]
    async fn favicon_refresh(&self, params: Parameters<FaviconRefreshParams>) -> Result<CallToolResult, McpError> {
        refresh_impl(&self.resolver, params.0).await
    }

    /// Clear the store and reseed it from the ranked domain list.
    #[tool(
        description = "Clear the favicon store and reseed it from a rank,domain CSV. seed_num defaults to and is capped by the configured maximum."
    )]
    async fn favicon_seed(&self, params: Parameters<FaviconSeedParams>) -> Result<CallToolResult, McpError> {
        seed_impl(&self.resolver, &self.config, params.0).await
    }
}

impl ServerHandler for FaviconServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "favicache".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
