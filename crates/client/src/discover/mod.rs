//! HTTP favicon discovery.
//!
//! ### Algorithm
//! 1. Fetch the site page and collect `<link rel="...icon...">` references,
//!    resolved against the post-redirect URL; the best ranked one wins.
//! 2. Without a usable link (or when the page answers with an error status),
//!    probe `/favicon.ico` at the site root.
//! 3. Otherwise report nothing found.
//!
//! Network failures other than an error status are reported as errors, not as
//! "nothing found".

pub mod icons;

pub use icons::{IconLink, best_icon, extract_icon_links};

use async_trait::async_trait;
use favicache_core::{Discover, Error};
use url::Url;

use crate::fetch::{FetchClient, FetchConfig};

/// Root-relative location browsers fall back to.
pub const DEFAULT_FAVICON_PATH: &str = "/favicon.ico";

/// Favicon location used when a page declares no icon link.
pub fn default_favicon_url(site: &Url) -> Result<Url, Error> {
    site.join(DEFAULT_FAVICON_PATH)
        .map_err(|e| Error::InvalidUrl(format!("{site}: {e}")))
}

/// [`Discover`] implementation backed by [`FetchClient`].
pub struct HttpDiscoverer {
    client: FetchClient,
}

impl HttpDiscoverer {
    /// Create a discoverer with its own fetch client.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        Ok(Self { client: FetchClient::new(config)? })
    }

    /// Wrap an existing fetch client.
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }

    /// Page-declared icon for `url`, plus the post-redirect URL used as the probe base.
    async fn declared_icon(&self, url: &Url) -> Result<(Option<String>, Url), Error> {
        match self.client.fetch(url.as_str()).await {
            Ok(response) => {
                let links = extract_icon_links(&response.text(), &response.final_url);
                let best = best_icon(&links).map(|link| link.href.clone());
                tracing::debug!(url = %url, icons = links.len(), best = ?best, "parsed page for icon links");
                Ok((best, response.final_url))
            }
            Err(Error::HttpStatus(status)) => {
                tracing::debug!(url = %url, status, "page fetch returned error status");
                Ok((None, url.clone()))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Discover for HttpDiscoverer {
    async fn discover(&self, url: &str) -> Result<Option<String>, Error> {
        let site = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;

        let (declared, base) = self.declared_icon(&site).await?;
        if declared.is_some() {
            return Ok(declared);
        }

        let fallback = default_favicon_url(&base)?;
        if self.client.probe(&fallback).await? {
            tracing::debug!(url, favicon = %fallback, "using root favicon");
            return Ok(Some(fallback.to_string()));
        }

        tracing::debug!(url, "no favicon found");
        Ok(None)
    }
}
