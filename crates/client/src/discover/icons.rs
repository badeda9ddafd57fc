//! Icon reference harvesting from HTML documents.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// A `<link>` element that references an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLink {
    /// Lowercased `rel` attribute
    pub rel: String,
    /// Resolved href URL
    pub href: String,
}

impl IconLink {
    /// Lower is preferred: `icon`/`shortcut icon`, then apple touch icons, then the rest.
    fn rank(&self) -> u8 {
        let tokens: Vec<&str> = self.rel.split_ascii_whitespace().collect();
        if tokens.contains(&"icon") {
            0
        } else if tokens.iter().any(|t| t.starts_with("apple-touch-icon")) {
            1
        } else {
            2
        }
    }
}

/// Extract icon links from an HTML document, resolving relative URLs against the base URL.
///
/// Any `<link>` whose `rel` has a token mentioning `icon` is kept. Inline
/// `data:` icons and unresolvable hrefs are skipped; duplicates (by href) are removed.
pub fn extract_icon_links(html: &str, base_url: &Url) -> Vec<IconLink> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("link[rel][href]").expect("invalid selector");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let rel = element.value().attr("rel").unwrap_or_default().to_ascii_lowercase();
        if !rel.split_ascii_whitespace().any(|token| token.contains("icon")) {
            continue;
        }

        let href = match element.value().attr("href").map(str::trim) {
            Some(h) if !h.is_empty() && !h.starts_with("data:") => h,
            _ => continue,
        };

        let resolved = match base_url.join(href) {
            Ok(u) => u.to_string(),
            Err(_) => continue,
        };

        if !seen.insert(resolved.clone()) {
            continue;
        }

        links.push(IconLink { rel, href: resolved });
    }

    links
}

/// Pick the preferred icon, keeping document order among equally ranked links.
pub fn best_icon(links: &[IconLink]) -> Option<&IconLink> {
    links.iter().min_by_key(|link| link.rank())
}
