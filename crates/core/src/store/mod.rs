//! Favicon record storage.
//!
//! [`FaviconStore`] is the capability the resolver depends on; [`FaviconDb`]
//! implements it on SQLite with async access via tokio-rusqlite. It provides:
//!
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - `last_modified` stamping on every write

pub mod connection;
pub mod migrations;
pub mod records;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::Error;

pub use connection::FaviconDb;

/// A persisted favicon record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FaviconRecord {
    pub id: i64,
    /// Canonical site key, see [`crate::canonicalize`].
    pub url: String,
    pub favicon_url: String,
    /// RFC 3339 UTC timestamp of the last insert or update.
    pub last_modified: String,
}

/// Fields supplied by the caller when inserting; the store stamps `last_modified`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavicon {
    pub id: i64,
    pub url: String,
    pub favicon_url: String,
}

/// Storage capability over one logical collection of [`FaviconRecord`]s.
///
/// Uniqueness of `url` is not enforced here; callers look up before inserting.
#[async_trait]
pub trait FaviconStore: Send + Sync {
    /// Find the record stored under a canonical key.
    async fn find_one(&self, url: &str) -> Result<Option<FaviconRecord>, Error>;

    /// Insert a record, returning the store-generated row id.
    async fn insert_one(&self, record: NewFavicon) -> Result<i64, Error>;

    /// Replace the favicon URL of record `id`. Returns false when no record matched.
    async fn update_one(&self, id: i64, favicon_url: &str) -> Result<bool, Error>;

    /// Highest stored id, or `-1` for an empty collection.
    async fn max_id(&self) -> Result<i64, Error>;

    /// Remove every record.
    async fn drop_collection(&self) -> Result<(), Error>;
}
