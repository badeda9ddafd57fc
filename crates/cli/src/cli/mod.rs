//! CLI for the favicache favicon resolver.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use favicache_client::{FetchConfig, HttpDiscoverer};
use favicache_core::{AppConfig, FaviconDb, Resolver};

use commands::{run_get, run_refresh, run_seed};

/// Top-level CLI for favicache.
#[derive(Debug, Parser)]
#[command(name = "favicache")]
#[command(about = "favicache: look up, refresh and seed site favicons", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Look up a site's favicon, discovering it on a miss.
    Get {
        /// Site URL in any form (google.com, http://www.google.com/index.html).
        url: String,
    },

    /// Rediscover a site's favicon and overwrite the stored result.
    Refresh {
        /// Site URL in any form.
        url: String,
    },

    /// Clear the store and reseed it from a rank,domain CSV.
    Seed {
        /// Rows to seed (default and upper bound: configured seed_count_max).
        #[arg(long, value_name = "N")]
        count: Option<usize>,

        /// CSV file to read instead of the configured seed_file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

/// Open the configured store and build a resolver over live HTTP discovery.
async fn build_resolver(config: &AppConfig) -> Result<Resolver> {
    let db = FaviconDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening database {}", config.db_path.display()))?;
    let discoverer = HttpDiscoverer::new(FetchConfig::from(config))?;
    Ok(Resolver::new(Arc::new(db), Arc::new(discoverer)))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = AppConfig::load()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let resolver = build_resolver(&cfg).await?;

        match cli.command {
            CliCommand::Get { url } => run_get(&resolver, &url).await?,
            CliCommand::Refresh { url } => run_refresh(&resolver, &url).await?,
            CliCommand::Seed { count, file } => run_seed(&resolver, &cfg, count, file).await?,
        }

        Ok(())
    }
}
