//! favicon_seed tool implementation.
//!
//! Clears the store and reseeds it from a `rank,domain` CSV.

use std::path::PathBuf;

use favicache_core::{AppConfig, Resolver, SeedReport, read_seed_rows, seed};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::error::ToolError;

/// Parameters for the favicon_seed tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FaviconSeedParams {
    /// Number of rows to seed (default and upper bound: configured `seed_count_max`).
    #[serde(default)]
    pub seed_num: Option<usize>,

    /// CSV file to read instead of the configured `seed_file`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Output from the favicon_seed tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FaviconSeedOutput {
    /// `<n> rows seeded in <x> seconds`
    pub summary: String,
    pub report: SeedReport,
}

/// Implementation of the favicon_seed tool.
pub async fn seed_impl(
    resolver: &Resolver, config: &AppConfig, params: FaviconSeedParams,
) -> Result<CallToolResult, McpError> {
    let count = config.seed_count(params.seed_num);
    let path = params.path.map(PathBuf::from).unwrap_or_else(|| config.seed_file.clone());

    let rows = read_seed_rows(&path, count)
        .await
        .map_err(|e| ToolError::InvalidInput(e.to_string()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "seeding favicon store");

    let report = seed(resolver, rows, count).await?;
    let output = FaviconSeedOutput { summary: report.summary(), report };

    json_result(&output)
}
