//! Favicon discovery capability.
//!
//! The resolver only knows this trait; the HTTP implementation lives in the
//! client crate so the core stays free of network code.

use async_trait::async_trait;

use crate::Error;

/// Finds the favicon reference for a canonical site URL.
#[async_trait]
pub trait Discover: Send + Sync {
    /// Discover the favicon URL for `url`.
    ///
    /// `Ok(None)` and `Ok(Some(""))` both mean nothing was found; `Err` is a
    /// failure of the discovery mechanism itself.
    async fn discover(&self, url: &str) -> Result<Option<String>, Error>;
}
