//! Core types and shared functionality for favicache.
//!
//! This crate provides:
//! - URL canonicalization into cache keys
//! - The favicon store (SQLite backend) and discovery capability traits
//! - The cache-or-fetch [`Resolver`] and bulk seeding
//! - Unified error types
//! - Configuration structures

pub mod canonical;
pub mod config;
pub mod discover;
pub mod error;
pub mod resolver;
pub mod seed;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use canonical::canonicalize;
pub use config::{AppConfig, ConfigError};
pub use discover::Discover;
pub use error::{Error, ErrorKind};
pub use resolver::{Resolution, Resolver};
pub use seed::{SeedReport, SeedRow, read_seed_rows, seed};
pub use store::{FaviconDb, FaviconRecord, FaviconStore, NewFavicon};
