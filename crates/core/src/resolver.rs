//! Cache-or-fetch favicon resolution.
//!
//! ### Cached mode
//! - Look the canonical key up first; a hit returns the stored favicon with
//!   no discovery and no write.
//! - A miss discovers and inserts, using the caller's record id if given.
//!
//! ### Forced mode
//! - Always discover. A hit updates the existing record in place (same id),
//!   otherwise a new record is inserted.
//!
//! A discovery miss never writes. Every failure comes back as a [`Resolution`]
//! with an empty favicon URL and a message; nothing is propagated.
//!
//! ### Concurrency
//! The lookup-decide-write sequence for one key runs under a per-key lock and
//! id allocation (`max_id + 1` then insert) under a resolver-wide lock, so two
//! calls through the same `Resolver` cannot double-insert a key or reuse an id.

use std::collections::HashMap;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::EMPTY_URL_MSG;
use crate::store::{FaviconStore, NewFavicon};
use crate::{Discover, Error, canonicalize};

/// Outcome of one resolution: exactly one of the two fields is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Resolution {
    /// Discovered or cached favicon URL; empty on failure.
    pub favicon_url: String,
    /// Failure description; empty on success.
    pub error_msg: String,
}

impl Resolution {
    pub fn found(favicon_url: impl Into<String>) -> Self {
        Self { favicon_url: favicon_url.into(), error_msg: String::new() }
    }

    pub fn failed(error_msg: impl Into<String>) -> Self {
        Self { favicon_url: String::new(), error_msg: error_msg.into() }
    }

    pub fn is_found(&self) -> bool {
        self.error_msg.is_empty() && !self.favicon_url.is_empty()
    }
}

impl From<Error> for Resolution {
    fn from(err: Error) -> Self {
        Self::failed(err.user_message())
    }
}

/// Per-key mutual exclusion. Idle entries are pruned on each acquisition.
#[derive(Debug, Default)]
struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}

/// Favicon resolver over injected store and discovery capabilities.
pub struct Resolver {
    store: Arc<dyn FaviconStore>,
    discoverer: Arc<dyn Discover>,
    key_locks: KeyLocks,
    id_alloc: Mutex<()>,
}

impl Resolver {
    /// Create a resolver. Construct once and share it by `Arc`.
    pub fn new(store: Arc<dyn FaviconStore>, discoverer: Arc<dyn Discover>) -> Self {
        Self { store, discoverer, key_locks: KeyLocks::default(), id_alloc: Mutex::new(()) }
    }

    /// The store this resolver writes to.
    pub fn store(&self) -> &Arc<dyn FaviconStore> {
        &self.store
    }

    /// Resolve the favicon URL for `raw_url`.
    ///
    /// `record_id` is used as the id of a newly inserted record in cached mode;
    /// otherwise ids are `max_id + 1`. `force_refresh` bypasses the cached
    /// record and always runs discovery.
    pub async fn resolve(&self, raw_url: &str, record_id: Option<i64>, force_refresh: bool) -> Resolution {
        if raw_url.is_empty() {
            return Resolution::failed(EMPTY_URL_MSG);
        }

        match self.try_resolve(raw_url, record_id, force_refresh).await {
            Ok(favicon_url) => Resolution::found(favicon_url),
            Err(err) => {
                tracing::warn!(url = raw_url, force_refresh, error = %err, "favicon resolution failed");
                err.into()
            }
        }
    }

    async fn try_resolve(&self, raw_url: &str, record_id: Option<i64>, force_refresh: bool) -> Result<String, Error> {
        let key = canonicalize(raw_url)?;
        let _guard = self.key_locks.acquire(&key).await;

        if force_refresh { self.refresh(&key).await } else { self.lookup_or_fetch(&key, record_id).await }
    }

    async fn lookup_or_fetch(&self, key: &str, record_id: Option<i64>) -> Result<String, Error> {
        if let Some(record) = self.store.find_one(key).await? {
            tracing::debug!(key, id = record.id, "favicon cache hit");
            return Ok(record.favicon_url);
        }

        tracing::debug!(key, "favicon cache miss");
        let favicon_url = self.discover(key).await?;
        self.insert(key, &favicon_url, record_id).await?;
        Ok(favicon_url)
    }

    async fn refresh(&self, key: &str) -> Result<String, Error> {
        let favicon_url = self.discover(key).await?;

        match self.store.find_one(key).await? {
            Some(record) => {
                if self.store.update_one(record.id, &favicon_url).await? {
                    tracing::info!(key, id = record.id, favicon_url = %favicon_url, "updated favicon");
                } else {
                    tracing::warn!(key, id = record.id, "favicon record vanished before update");
                }
            }
            None => {
                self.insert(key, &favicon_url, None).await?;
            }
        }

        Ok(favicon_url)
    }

    async fn discover(&self, key: &str) -> Result<String, Error> {
        match self.discoverer.discover(key).await? {
            Some(favicon_url) if !favicon_url.is_empty() => Ok(favicon_url),
            _ => Err(Error::NotFound(key.to_string())),
        }
    }

    async fn insert(&self, key: &str, favicon_url: &str, record_id: Option<i64>) -> Result<i64, Error> {
        let _alloc = self.id_alloc.lock().await;

        let id = match record_id {
            Some(id) => id,
            None => self.store.max_id().await? + 1,
        };

        self.store
            .insert_one(NewFavicon { id, url: key.to_string(), favicon_url: favicon_url.to_string() })
            .await?;
        tracing::info!(key, id, favicon_url = %favicon_url, "inserted favicon");

        Ok(id)
    }
}
