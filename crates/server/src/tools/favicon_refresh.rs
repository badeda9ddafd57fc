//! favicon_refresh tool implementation.
//!
//! Resolves a favicon in forced mode: discovery always runs and a found icon
//! replaces the stored one.

use favicache_core::Resolver;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the favicon_refresh tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FaviconRefreshParams {
    /// Site URL in any form.
    pub url: String,
}

/// Implementation of the favicon_refresh tool.
pub async fn refresh_impl(resolver: &Resolver, params: FaviconRefreshParams) -> Result<CallToolResult, McpError> {
    let resolution = resolver.resolve(&params.url, None, true).await;
    json_result(&resolution)
}
