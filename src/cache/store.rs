//! Shared query cache.
//!
//! One process-wide mapping from [`QueryKey`] to a type-erased value,
//! built on Moka. Reads go through [`QueryCache::fetch`], which coalesces
//! concurrent loads of the same key into a single request; writes happen
//! only through invalidation (exact or by key prefix) followed by the
//! next read's refetch.

use std::any::Any;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use moka::future::Cache;
use tracing::{debug, warn};

use crate::api::{ApiError, ApiResult};

use super::key::QueryKey;
use super::CacheConfig;

/// Error of a coalesced query load.
///
/// Shared because a single failed request is delivered to every waiter
/// that coalesced onto it.
pub type QueryError = Arc<ApiError>;

/// Result of a cached query: the value is shared between all readers of
/// the same cache entry.
pub type QueryResult<T> = Result<Arc<T>, QueryError>;

/// Internal cache entry storing a type-erased value.
#[derive(Clone)]
struct Stored {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Stored {
    fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Per-domain hit/miss counters.
#[derive(Default)]
struct DomainCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Snapshot of one domain's cache traffic.
#[derive(Debug, Clone)]
pub struct DomainStats {
    pub domain: &'static str,
    pub hits: u64,
    pub misses: u64,
}

/// Process-wide query cache.
///
/// Cloning is cheap and shares the same underlying cache, so one
/// instance per session is handed to every repository.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<QueryKey, Stored>,
    stats: Arc<DashMap<&'static str, DomainCounters>>,
    retries: u32,
}

impl QueryCache {
    /// Create a new query cache with the given config.
    pub fn new(config: CacheConfig) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(config.max_capacity)
            .support_invalidation_closures();

        if let Some(stale) = config.stale_after {
            builder = builder.time_to_live(stale);
        }

        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        Self {
            inner: builder.build(),
            stats: Arc::new(DashMap::new()),
            retries: config.query_retries,
        }
    }

    /// Read through the cache.
    ///
    /// Returns the cached value if present and inside the staleness
    /// window. Otherwise runs `loader` (exactly once even when several
    /// callers ask for the same key concurrently) and caches the result.
    /// A failed load is never cached; its error is delivered to every
    /// coalesced waiter, and the next read runs the loader again.
    ///
    /// # Panics
    /// Panics if the key already holds a value of a different type. Keys
    /// come from the per-domain factories, so each key maps to exactly
    /// one value type.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, loader: F) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let loaded = AtomicBool::new(false);

        let entry = self
            .inner
            .try_get_with(key.clone(), async {
                loaded.store(true, Ordering::Relaxed);
                let mut attempt: u32 = 0;
                loop {
                    match loader().await {
                        Ok(value) => {
                            debug!("loaded {key}");
                            return Ok(Stored::new(value));
                        }
                        Err(err) if attempt < self.retries => {
                            attempt += 1;
                            warn!(
                                "query {key} failed: {err}; retrying ({attempt}/{})",
                                self.retries
                            );
                        }
                        Err(err) => {
                            warn!("query {key} failed: {err}");
                            return Err(err);
                        }
                    }
                }
            })
            .await;

        self.record(&key, loaded.load(Ordering::Relaxed));

        let entry = entry?;

        match entry.value.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => panic!(
                "cache key `{key}` holds a {} but a {} was requested",
                entry.type_name,
                std::any::type_name::<T>()
            ),
        }
    }

    /// Invalidate a single entry by exact key.
    pub async fn invalidate(&self, key: &QueryKey) {
        self.inner.invalidate(key).await;
        debug!("invalidated {key}");
    }

    /// Invalidate every entry whose key starts with `prefix`.
    ///
    /// Marks matching entries stale so the next read refetches them;
    /// entries under sibling prefixes are untouched.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        let matched = prefix.clone();
        self.inner
            .invalidate_entries_if(move |key, _| key.starts_with(&matched))
            .expect("invalidation closures enabled at cache construction");
        debug!("invalidated prefix {prefix}");
    }

    /// Drop every entry. Used when a session ends.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        debug!("invalidated all cache entries");
    }

    /// Check whether a key currently has a cached entry.
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Approximate number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Snapshot of per-domain cache traffic.
    pub fn stats(&self) -> Vec<DomainStats> {
        self.stats
            .iter()
            .map(|entry| DomainStats {
                domain: *entry.key(),
                hits: entry.value().hits.load(Ordering::Relaxed),
                misses: entry.value().misses.load(Ordering::Relaxed),
            })
            .collect()
    }

    fn record(&self, key: &QueryKey, missed: bool) {
        let counters = self.stats.entry(key.domain()).or_default();
        if missed {
            counters.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!("{key} served from cache");
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entry_count", &self.inner.entry_count())
            .field("retries", &self.retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use uuid::Uuid;

    use crate::cache::keys;
    use crate::domain::common::{ContentFilters, Difficulty};

    use super::*;

    fn server_error() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = QueryCache::new(CacheConfig::default());
        let calls = AtomicU32::new(0);
        let key = keys::reading::list();

        for _ in 0..2 {
            let value = cache
                .fetch(key.clone(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>("passages".to_string())
                })
                .await
                .unwrap();
            assert_eq!(*value, "passages");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_coalesce_into_one_request() {
        let cache = QueryCache::new(CacheConfig::default());
        let calls = AtomicU32::new(0);
        let key = keys::practice::attempt(Uuid::new_v4());

        let loader = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<_, ApiError>(42u32)
        };

        let (a, b) = tokio::join!(
            cache.fetch(key.clone(), loader),
            cache.fetch(key.clone(), loader),
        );

        assert_eq!(*a.unwrap(), 42);
        assert_eq!(*b.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch_and_spares_siblings() {
        let cache = QueryCache::new(CacheConfig::default());
        let id = Uuid::new_v4();
        let detail_calls = AtomicU32::new(0);
        let list_calls = AtomicU32::new(0);
        let filtered_calls = AtomicU32::new(0);
        let sibling_calls = AtomicU32::new(0);
        let filters = ContentFilters::new().difficulty(Difficulty::Easy);

        let read_all = || async {
            cache
                .fetch(keys::listening::detail(id), || async {
                    detail_calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>("item".to_string())
                })
                .await
                .unwrap();
            cache
                .fetch(keys::listening::list(), || async {
                    list_calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>(vec!["item".to_string()])
                })
                .await
                .unwrap();
            cache
                .fetch(keys::listening::list_filtered(&filters), || async {
                    filtered_calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>(vec!["easy item".to_string()])
                })
                .await
                .unwrap();
            cache
                .fetch(keys::reading::list(), || async {
                    sibling_calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>(vec!["passage".to_string()])
                })
                .await
                .unwrap();
        };

        read_all().await;

        // What a listening-item update does: detail key plus list prefix.
        cache.invalidate(&keys::listening::detail(id)).await;
        cache.invalidate_prefix(&keys::listening::list());

        read_all().await;

        assert_eq!(detail_calls.load(Ordering::SeqCst), 2);
        assert_eq!(list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(filtered_calls.load(Ordering::SeqCst), 2);
        assert_eq!(sibling_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prefix_invalidation_covers_attempt_subtree() {
        let cache = QueryCache::new(CacheConfig::default());
        let attempt_id = Uuid::new_v4();
        let result_calls = AtomicU32::new(0);

        let read = || async {
            cache
                .fetch(keys::practice::attempt_result(attempt_id), || async {
                    result_calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ApiError>("scored".to_string())
                })
                .await
                .unwrap();
        };

        read().await;
        cache.invalidate_prefix(&keys::practice::attempt(attempt_id));
        read().await;

        assert_eq!(result_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = QueryCache::new(CacheConfig::default().query_retries(0));
        let calls = AtomicU32::new(0);
        let key = keys::contest::list();

        for _ in 0..2 {
            let result: QueryResult<String> = cache
                .fetch(key.clone(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(server_error())
                })
                .await;
            assert!(result.is_err());
        }

        // Both reads hit the network: errors never occupy a cache slot.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_query_retries_once_by_default() {
        let cache = QueryCache::new(CacheConfig::default());
        let calls = AtomicU32::new(0);
        let key = keys::classroom::list();

        let value = cache
            .fetch(key, || async {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                if attempt == 0 {
                    Err(server_error())
                } else {
                    Ok("classrooms".to_string())
                }
            })
            .await
            .unwrap();

        assert_eq!(*value, "classrooms");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stats_count_hits_and_misses_per_domain() {
        let cache = QueryCache::new(CacheConfig::default());
        let key = keys::reading::list();

        for _ in 0..3 {
            let _ = cache
                .fetch(key.clone(), || async { Ok::<_, ApiError>(1u32) })
                .await;
        }

        let stats = cache.stats();
        let reading = stats.iter().find(|s| s.domain == "reading").unwrap();
        assert_eq!(reading.misses, 1);
        assert_eq!(reading.hits, 2);
    }
}
