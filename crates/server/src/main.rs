//! favicache MCP server entry point.
//!
//! Boots the favicon resolver on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use favicache_client::{FetchConfig, HttpDiscoverer};
use favicache_core::{AppConfig, FaviconDb, Resolver};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(db_path = %config.db_path.display(), "Starting favicache server on stdio transport");

    let db = FaviconDb::open(&config.db_path).await?;
    let discoverer = HttpDiscoverer::new(FetchConfig::from(&config))?;
    let resolver = Resolver::new(Arc::new(db), Arc::new(discoverer));

    let handler = handler::FaviconServer::new(Arc::new(resolver), Arc::new(config));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
