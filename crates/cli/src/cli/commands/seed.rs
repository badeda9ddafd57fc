//! `favicache seed`: bulk load the store from the ranked domain list.

use std::path::PathBuf;

use anyhow::Result;
use favicache_core::{AppConfig, Resolver, read_seed_rows, seed};

pub async fn run_seed(resolver: &Resolver, cfg: &AppConfig, count: Option<usize>, file: Option<PathBuf>) -> Result<()> {
    let count = cfg.seed_count(count);
    let path = file.unwrap_or_else(|| cfg.seed_file.clone());

    let rows = read_seed_rows(&path, count).await?;
    tracing::info!(path = %path.display(), rows = rows.len(), "seeding favicon store");

    let report = seed(resolver, rows, count).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("{}", report.summary());
    Ok(())
}
