//! Bulk seeding of the favicon store from a ranked domain list.
//!
//! Input is `rank,domain` CSV (the Alexa top-1m layout). The rank becomes the
//! record id. Seeding clears the collection once, then resolves each row in
//! cached mode, sequentially; a failing row is counted and skipped.

use std::path::Path;
use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{Error, Resolver};

/// One row of seed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRow {
    pub id: i64,
    pub url: String,
}

/// Aggregate result of a seeding batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SeedReport {
    /// Rows processed (resolved, successfully or not).
    pub rows: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Wall-clock time spent resolving, in seconds.
    pub elapsed_secs: f64,
}

impl SeedReport {
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }

    /// `"<n> rows seeded in <x> seconds"`.
    pub fn summary(&self) -> String {
        format!("{} rows seeded in {} seconds", self.rows, self.elapsed_secs)
    }
}

/// Parse one `rank,domain` line. Returns `Ok(None)` for blank lines.
fn parse_line(line: &str, line_no: usize) -> Result<Option<SeedRow>, Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (rank, domain) = line
        .split_once(',')
        .ok_or_else(|| Error::InvalidInput(format!("line {line_no}: expected `rank,domain`")))?;

    let id = rank
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::InvalidInput(format!("line {line_no}: bad rank {rank:?}: {e}")))?;

    let url = domain.trim().trim_matches('"').to_string();
    Ok(Some(SeedRow { id, url }))
}

/// Read up to `max` seed rows from a `rank,domain` CSV file.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the file cannot be read or a non-blank
/// line lacks an integer rank.
pub async fn read_seed_rows(path: impl AsRef<Path>, max: usize) -> Result<Vec<SeedRow>, Error> {
    let path = path.as_ref();
    let file = File::open(path)
        .await
        .map_err(|e| Error::InvalidInput(format!("cannot open {}: {e}", path.display())))?;

    let mut lines = BufReader::new(file).lines();
    let mut rows = Vec::new();
    let mut line_no = 0;

    while rows.len() < max {
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| Error::InvalidInput(format!("cannot read {}: {e}", path.display())))?
        else {
            break;
        };
        line_no += 1;

        if let Some(row) = parse_line(&line, line_no)? {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Clear the store and resolve up to `max` rows in cached mode.
///
/// # Errors
///
/// Only a failure to clear the collection aborts the batch; per-row failures
/// are counted in the report.
pub async fn seed(resolver: &Resolver, rows: impl IntoIterator<Item = SeedRow>, max: usize) -> Result<SeedReport, Error> {
    resolver.store().drop_collection().await?;

    let start = Instant::now();
    let mut report = SeedReport { rows: 0, succeeded: 0, failed: 0, elapsed_secs: 0.0 };

    for row in rows.into_iter().take(max) {
        let result = resolver.resolve(&row.url, Some(row.id), false).await;
        report.rows += 1;

        if result.is_found() {
            report.succeeded += 1;
        } else {
            report.failed += 1;
            tracing::warn!(id = row.id, url = %row.url, error = %result.error_msg, "seed row failed");
        }
        tracing::debug!(row = report.rows, id = row.id, url = %row.url, "seeded row");
    }

    report.elapsed_secs = start.elapsed().as_secs_f64();
    tracing::info!(
        rows = report.rows,
        succeeded = report.succeeded,
        failed = report.failed,
        elapsed_secs = report.elapsed_secs,
        "seeding finished"
    );

    Ok(report)
}
