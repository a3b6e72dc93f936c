//! Cache configuration.

use std::time::Duration;

/// Configuration for the query cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Staleness window: after this duration a cached value is evicted
    /// and the next read refetches it.
    pub stale_after: Option<Duration>,

    /// Time-to-idle for cache entries.
    /// Entries are evicted if not accessed within this duration.
    pub tti: Option<Duration>,

    /// How many times a failed query load is retried before the error
    /// surfaces. Mutations never retry.
    pub query_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            stale_after: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
            query_retries: 1,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set max capacity (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set the staleness window.
    #[must_use]
    pub fn stale_after(mut self, duration: Duration) -> Self {
        self.stale_after = Some(duration);
        self
    }

    /// Set time-to-idle for cache entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }

    /// Disable the staleness window (entries never expire by age).
    #[must_use]
    pub fn never_stale(mut self) -> Self {
        self.stale_after = None;
        self
    }

    /// Set the query retry count.
    #[must_use]
    pub fn query_retries(mut self, retries: u32) -> Self {
        self.query_retries = retries;
        self
    }

    /// Config for curated exam content.
    /// Materials change only through the manager console, so they can
    /// stay fresh for a long time.
    pub fn content() -> Self {
        Self {
            max_capacity: 5_000,
            stale_after: Some(Duration::from_secs(1800)), // 30 minutes
            tti: None,
            query_retries: 1,
        }
    }

    /// Config for in-progress attempt data.
    /// Short window so a student never sees a stale answer sheet.
    pub fn live_attempts() -> Self {
        Self {
            max_capacity: 2_000,
            stale_after: Some(Duration::from_secs(30)),
            tti: Some(Duration::from_secs(15)),
            query_retries: 1,
        }
    }

    /// Config for session-scoped account data.
    pub fn session_data() -> Self {
        Self {
            max_capacity: 1_000,
            stale_after: Some(Duration::from_secs(900)), // 15 minutes
            tti: Some(Duration::from_secs(300)),
            query_retries: 1,
        }
    }
}
