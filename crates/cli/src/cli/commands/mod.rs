//! Subcommand implementations.

mod get;
mod seed;

pub use get::{run_get, run_refresh};
pub use seed::run_seed;
