//! Unified error types for favicache.
//!
//! Every variant belongs to one [`ErrorKind`]; the resolver turns any of them
//! into a soft, per-call message instead of propagating it.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Message reported when resolution is attempted without a URL.
pub const EMPTY_URL_MSG: &str = "URL is empty!";

/// Message reported when discovery ran but found no icon reference.
pub const NOT_FOUND_MSG: &str = "Unable to find favicon :(";

/// Unified error types for favicache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The raw URL was empty.
    #[error("INVALID_INPUT: URL is empty!")]
    EmptyInput,

    /// Invalid caller input other than the URL (e.g., a malformed seed file).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The URL could not be interpreted, even after prepending a scheme.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Discovery ran but produced no icon reference for the given key.
    #[error("NOT_FOUND: no favicon for {0}")]
    NotFound(String),

    /// Network or protocol failure while fetching.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Non-success HTTP status.
    #[error("HTTP_ERROR: status {0}")]
    HttpStatus(u16),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

/// Coarse classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    ParseError,
    DiscoveryNotFound,
    DiscoveryFailure,
    StoreFailure,
}

impl Error {
    /// Which failure category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput | Error::InvalidInput(_) => ErrorKind::EmptyInput,
            Error::InvalidUrl(_) => ErrorKind::ParseError,
            Error::NotFound(_) => ErrorKind::DiscoveryNotFound,
            Error::HttpError(_) | Error::HttpStatus(_) | Error::FetchTimeout(_) | Error::FetchTooLarge(_) => {
                ErrorKind::DiscoveryFailure
            }
            Error::Database(_) | Error::MigrationFailed(_) => ErrorKind::StoreFailure,
        }
    }

    /// Human-readable message handed back to callers alongside an empty favicon URL.
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyInput => EMPTY_URL_MSG.to_string(),
            Error::NotFound(_) => NOT_FOUND_MSG.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match err.kind() {
            ErrorKind::EmptyInput => -32602,
            ErrorKind::ParseError => -32003,
            ErrorKind::DiscoveryNotFound => -32001,
            ErrorKind::DiscoveryFailure => -32008,
            ErrorKind::StoreFailure => -32002,
        };

        McpError { code: ErrorCode(code), message: err.user_message().into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidUrl("http://".to_string());
        assert!(err.to_string().contains("INVALID_URL"));
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(Error::EmptyInput.user_message(), "URL is empty!");
        assert_eq!(Error::NotFound("http://www.example.com".into()).user_message(), "Unable to find favicon :(");
        assert_eq!(Error::HttpStatus(503).user_message(), "HTTP_ERROR: status 503");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::EmptyInput);
        assert_eq!(Error::InvalidUrl(String::new()).kind(), ErrorKind::ParseError);
        assert_eq!(Error::NotFound(String::new()).kind(), ErrorKind::DiscoveryNotFound);
        assert_eq!(Error::FetchTimeout(String::new()).kind(), ErrorKind::DiscoveryFailure);
        assert_eq!(Error::MigrationFailed(String::new()).kind(), ErrorKind::StoreFailure);
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::NotFound("http://www.example.com".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);
        assert_eq!(mcp_err.message, "Unable to find favicon :(");
    }
}
