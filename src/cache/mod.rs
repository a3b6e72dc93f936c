//! Cache module - query cache and key factories, built on Moka.
//!
//! Cached server data is addressed by hierarchical [`QueryKey`]s that
//! form a prefix lattice, so a mutation can invalidate a whole subtree
//! of entries with one prefix match.
//!
//! ## Architecture
//!
//! - [`QueryKey`] / [`Filters`] - ordered-segment keys with structural
//!   equality and normalized filter bags
//! - [`keys`] - per-domain key factories (reading, listening, practice,
//!   classroom, contest, account)
//! - [`QueryCache`] - shared store with staleness-based eviction,
//!   request coalescing, and prefix invalidation
//! - [`CacheConfig`] - capacity, staleness window, retry count
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = QueryCache::new(CacheConfig::default());
//!
//! // Read through the cache; concurrent identical reads coalesce.
//! let item = cache
//!     .fetch(keys::reading::detail(id), || async { api.get(&path).await })
//!     .await?;
//!
//! // After a mutation, drop the stale subtree.
//! cache.invalidate_prefix(&keys::reading::list());
//! ```

mod config;
mod key;
pub mod keys;
mod store;

use once_cell::sync::Lazy;

pub use config::CacheConfig;
pub use key::{Filters, QueryKey, Segment};
pub use store::{DomainStats, QueryCache, QueryError, QueryResult};

/// Process-wide default cache.
static SHARED: Lazy<QueryCache> = Lazy::new(|| QueryCache::new(CacheConfig::default()));

/// The process-wide default query cache.
///
/// Created on first use with the default config and never destroyed;
/// callers that build a [`crate::Platform`] get a session-scoped cache
/// instead and should prefer it.
pub fn shared() -> &'static QueryCache {
    &SHARED
}
