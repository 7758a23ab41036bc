//! Configuration Module
//!
//! Handles loading and managing data-layer configuration from environment variables.

use std::env;
use std::time::Duration;

/// Data-layer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote content API (the `/api` suffix is appended by the client)
    pub base_url: String,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL for cached entries
    pub default_ttl: Duration,
    /// TTL for cached search results (shorter: filter combinations are numerous)
    pub search_ttl: Duration,
    /// Background cleanup sweep interval
    pub cleanup_interval: Duration,
    /// Background stats snapshot interval
    pub stats_interval: Duration,
    /// Debounce quiet window for search input
    pub debounce: Duration,
    /// Optional per-request timeout (unlimited when None)
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_API_BASE_URL` - Remote API base URL (default: http://localhost:8000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 200)
    /// - `CACHE_DEFAULT_TTL_SECS` - Default TTL in seconds (default: 3600)
    /// - `SEARCH_TTL_SECS` - Search result TTL in seconds (default: 600)
    /// - `CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds (default: 300)
    /// - `STATS_INTERVAL_SECS` - Stats snapshot frequency in seconds (default: 60)
    /// - `SEARCH_DEBOUNCE_MS` - Debounce window in milliseconds (default: 500)
    /// - `REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("CATALOG_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            default_ttl: Duration::from_secs(
                env::var("CACHE_DEFAULT_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3600),
            ),
            search_ttl: Duration::from_secs(
                env::var("SEARCH_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(600),
            ),
            cleanup_interval: Duration::from_secs(
                env::var("CLEANUP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            ),
            stats_interval: Duration::from_secs(
                env::var("STATS_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            ),
            debounce: Duration::from_millis(
                env::var("SEARCH_DEBOUNCE_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
            ),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            max_entries: 200,
            default_ttl: Duration::from_secs(3600),
            search_ttl: Duration::from_secs(600),
            cleanup_interval: Duration::from_secs(300),
            stats_interval: Duration::from_secs(60),
            debounce: Duration::from_millis(500),
            request_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 200);
        assert_eq!(config.default_ttl, Duration::from_secs(3600));
        assert_eq!(config.search_ttl, Duration::from_secs(600));
        assert_eq!(config.cleanup_interval, Duration::from_secs(300));
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CATALOG_API_BASE_URL");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("CACHE_DEFAULT_TTL_SECS");
        env::remove_var("SEARCH_TTL_SECS");
        env::remove_var("CLEANUP_INTERVAL_SECS");
        env::remove_var("STATS_INTERVAL_SECS");
        env::remove_var("SEARCH_DEBOUNCE_MS");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.max_entries, 200);
        assert_eq!(config.search_ttl, Duration::from_secs(600));
    }
}
