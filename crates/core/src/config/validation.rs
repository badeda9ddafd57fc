//! Bounds checks applied to a loaded [`AppConfig`].

use std::ops::RangeInclusive;

use crate::config::AppConfig;
use thiserror::Error;

/// Page bodies larger than this are never worth reading for icon links.
const MAX_BYTES_RANGE: RangeInclusive<usize> = 1..=50 * 1024 * 1024;

/// 100ms to 5 minutes.
const TIMEOUT_MS_RANGE: RangeInclusive<u64> = 100..=300_000;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid { field: field.to_string(), reason: reason.into() }
    }
}

impl AppConfig {
    /// Reject settings the resolver or seeder cannot work with.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the first offending field:
    /// `db_path` empty, `user_agent` empty, `max_bytes` outside 1 byte..=50MB,
    /// `timeout_ms` outside 100..=300000, or `seed_count_max` of 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("db_path", "must not be empty"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("user_agent", "must not be empty"));
        }

        if !MAX_BYTES_RANGE.contains(&self.max_bytes) {
            return Err(ConfigError::invalid(
                "max_bytes",
                format!("must be between {} and {}", MAX_BYTES_RANGE.start(), MAX_BYTES_RANGE.end()),
            ));
        }

        if !TIMEOUT_MS_RANGE.contains(&self.timeout_ms) {
            return Err(ConfigError::invalid(
                "timeout_ms",
                format!("must be between {}ms and {}ms", TIMEOUT_MS_RANGE.start(), TIMEOUT_MS_RANGE.end()),
            ));
        }

        if self.seed_count_max == 0 {
            return Err(ConfigError::invalid("seed_count_max", "must be greater than 0"));
        }

        if self.max_redirects == 0 {
            tracing::warn!("max_redirects is 0; redirected sites will fail discovery");
        }

        Ok(())
    }
}
