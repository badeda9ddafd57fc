//! URL canonicalization into favicon cache keys.
//!
//! Every spelling of a site collapses onto one `scheme://www.host` key:
//! `google.com`, `google.com/index.html`, `http://google.com` and
//! `http://www.google.com/index.html` are all stored as `http://www.google.com`.

use url::{ParseError, Url};

use crate::Error;

/// Scheme assumed when the input has none.
pub const DEFAULT_SCHEME: &str = "http";

const WWW_PREFIX: &str = "www.";

/// Canonicalize a raw URL string into a cache key of the form `scheme://host`.
///
/// Steps, each re-parsing the previous result:
/// 1. Parse; when no scheme is present prepend `http://` and parse again
/// 2. If the host lacks a `www.` prefix, rebuild as `scheme://www.host`
/// 3. Keep only `scheme://host` (path, query, fragment, port and credentials are dropped)
pub fn canonicalize(raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut parsed = parse_with_scheme(trimmed)?;

    let host = host_of(&parsed)?;
    if !host.starts_with(WWW_PREFIX) {
        parsed = parse(&format!("{}://{WWW_PREFIX}{host}", parsed.scheme()))?;
    }

    Ok(format!("{}://{}", parsed.scheme(), host_of(&parsed)?))
}

/// Parse `input`, prepending the default scheme if it has none.
///
/// `localhost:8080` parses as scheme `localhost`, so anything that lacks
/// both a host and a leading `scheme://` is treated as schemeless.
fn parse_with_scheme(input: &str) -> Result<Url, Error> {
    match Url::parse(input) {
        Ok(url) if url.has_host() => Ok(url),
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) if !has_scheme_separator(input) => {
            parse(&format!("{DEFAULT_SCHEME}://{input}"))
        }
        Ok(url) => Err(Error::InvalidUrl(format!("no host in {url}"))),
        Err(e) => Err(Error::InvalidUrl(format!("{input}: {e}"))),
    }
}

/// Whether `://` appears before any path, query or fragment delimiter.
fn has_scheme_separator(input: &str) -> bool {
    match input.find("://") {
        Some(at) => !input[..at].contains(['/', '?', '#']),
        None => false,
    }
}

fn parse(input: &str) -> Result<Url, Error> {
    Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{input}: {e}")))
}

fn host_of(url: &Url) -> Result<&str, Error> {
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host),
        _ => Err(Error::InvalidUrl(format!("no host in {url}"))),
    }
}
