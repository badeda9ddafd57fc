//! favicon_get tool implementation.
//!
//! Resolves a favicon in cached mode: a stored result is returned as-is.

use favicache_core::Resolver;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the favicon_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FaviconGetParams {
    /// Site URL in any form (`google.com`, `http://www.google.com/index.html`, ...).
    pub url: String,
}

/// Implementation of the favicon_get tool.
///
/// Resolution failures are reported inside the output (`error_msg`), not as tool errors.
pub async fn get_impl(resolver: &Resolver, params: FaviconGetParams) -> Result<CallToolResult, McpError> {
    let resolution = resolver.resolve(&params.url, None, false).await;
    json_result(&resolution)
}
