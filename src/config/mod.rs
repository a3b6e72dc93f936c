//! Configuration module for the Lyceum data layer.
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use crate::cache::CacheConfig;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default staleness window in seconds.
const DEFAULT_STALE_SECS: u64 = 300;

/// Default cache capacity.
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default query retry count.
const DEFAULT_QUERY_RETRIES: u32 = 1;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the platform API. Always carries a trailing slash so
    /// endpoint paths can be appended directly.
    pub api_base_url: Url,

    /// Per-request timeout.
    pub api_timeout: Duration,

    /// Staleness window: how long a cached query result is served
    /// without a refetch.
    pub stale_after: Duration,

    /// Maximum number of cached query results.
    pub cache_capacity: u64,

    /// How many times a failed query is retried. Mutations never retry.
    pub query_retries: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `LYCEUM_API_BASE_URL` is unset or not a valid URL.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut raw_base =
            env::var("LYCEUM_API_BASE_URL").expect("LYCEUM_API_BASE_URL must be set");
        if !raw_base.ends_with('/') {
            raw_base.push('/');
        }
        let api_base_url =
            Url::parse(&raw_base).expect("LYCEUM_API_BASE_URL must be a valid URL");

        Self {
            api_base_url,
            api_timeout: Duration::from_secs(env_u64(
                "LYCEUM_API_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            stale_after: Duration::from_secs(env_u64("LYCEUM_STALE_SECS", DEFAULT_STALE_SECS)),
            cache_capacity: env_u64("LYCEUM_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY),
            query_retries: env_u64("LYCEUM_QUERY_RETRIES", u64::from(DEFAULT_QUERY_RETRIES))
                as u32,
        }
    }

    /// Cache configuration derived from this config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::with_capacity(self.cache_capacity)
            .stale_after(self.stale_after)
            .query_retries(self.query_retries)
    }
}

/// Read a numeric variable, falling back to a default when unset or
/// unparsable.
fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
