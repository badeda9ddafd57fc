//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FAVICACHE_*)
//! 2. TOML config file (if FAVICACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FAVICACHE_*)
/// 2. TOML config file (if FAVICACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite favicon database.
    ///
    /// Set via FAVICACHE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via FAVICACHE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via FAVICACHE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via FAVICACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects followed per request.
    ///
    /// Set via FAVICACHE_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// `rank,domain` CSV used by bulk seeding.
    ///
    /// Set via FAVICACHE_SEED_FILE environment variable.
    #[serde(default = "default_seed_file")]
    pub seed_file: PathBuf,

    /// Upper bound on rows seeded in one batch, and the default count.
    ///
    /// Set via FAVICACHE_SEED_COUNT_MAX environment variable.
    #[serde(default = "default_seed_count_max")]
    pub seed_count_max: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./favicache.sqlite")
}

fn default_user_agent() -> String {
    "favicache/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_seed_file() -> PathBuf {
    PathBuf::from("files/top-1m.csv")
}

fn default_seed_count_max() -> usize {
    200_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            seed_file: default_seed_file(),
            seed_count_max: default_seed_count_max(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of rows to seed for a requested count: the maximum when none
    /// (or zero) is requested, never more than the maximum.
    pub fn seed_count(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(n) if n > 0 => n.min(self.seed_count_max),
            _ => self.seed_count_max,
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FAVICACHE_`
    /// 2. TOML file from `FAVICACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FAVICACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("FAVICACHE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./favicache.sqlite"));
        assert_eq!(config.user_agent, "favicache/0.1");
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.seed_file, PathBuf::from("files/top-1m.csv"));
        assert_eq!(config.seed_count_max, 200_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_seed_count() {
        let config = AppConfig { seed_count_max: 100, ..Default::default() };
        assert_eq!(config.seed_count(None), 100);
        assert_eq!(config.seed_count(Some(0)), 100);
        assert_eq!(config.seed_count(Some(25)), 25);
        assert_eq!(config.seed_count(Some(1_000)), 100);
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("timeout_ms = 5000\nseed_count_max = 10\ndb_path = \"/tmp/favs.sqlite\""));

        let config = AppConfig::extract(figment).unwrap();
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.seed_count_max, 10);
        assert_eq!(config.db_path, PathBuf::from("/tmp/favs.sqlite"));
        assert_eq!(config.user_agent, "favicache/0.1");
    }

    #[test]
    fn test_invalid_layer_fails_validation() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string("timeout_ms = 1"));
        assert!(matches!(AppConfig::extract(figment), Err(ConfigError::Invalid { .. })));
    }
}
