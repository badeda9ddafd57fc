//! favicache command-line entry point.
//!
//! Logs go to stderr; results are printed as JSON on stdout.

use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("favicache error: {:#}", err);
        std::process::exit(1);
    }
}
