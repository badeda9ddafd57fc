//! MCP tool implementations.
//!
//! This module contains all tools exposed by the favicache server.

pub mod favicon_get;
pub mod favicon_refresh;
pub mod favicon_seed;

pub use favicon_get::{FaviconGetParams, get_impl};
pub use favicon_refresh::{FaviconRefreshParams, refresh_impl};
pub use favicon_seed::{FaviconSeedOutput, FaviconSeedParams, seed_impl};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ToolError;

/// Render `output` as the pretty JSON text content of a successful tool call.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(|e| ToolError::Serialize(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use favicache_core::{Discover, Error, FaviconDb, Resolver};
    use rmcp::model::CallToolResult;
    use serde::de::DeserializeOwned;

    /// Discovery stub that always returns the same answer.
    pub struct StaticDiscover(pub Option<&'static str>);

    #[async_trait]
    impl Discover for StaticDiscover {
        async fn discover(&self, _url: &str) -> Result<Option<String>, Error> {
            Ok(self.0.map(str::to_string))
        }
    }

    pub async fn resolver(answer: Option<&'static str>) -> (Arc<FaviconDb>, Resolver) {
        let db = Arc::new(FaviconDb::open_in_memory().await.unwrap());
        let resolver = Resolver::new(db.clone(), Arc::new(StaticDiscover(answer)));
        (db, resolver)
    }

    pub fn parse_output<T: DeserializeOwned>(result: &CallToolResult) -> T {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }
}
