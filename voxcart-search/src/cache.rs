//! In-memory cache for live provider responses.
//!
//! Caches one provider's normalised [`SearchResult`] keyed by the
//! (provider, endpoint, lowercased query, filters) tuple. Uses [`moka`]
//! for async-friendly caching with a TTL and bounded capacity. Sample
//! fallbacks are never inserted.

use std::time::Duration;

use moka::future::Cache;

use crate::types::{FilterSet, ProviderKind, SearchResult};

/// Maximum number of cached provider responses.
const MAX_CACHE_ENTRIES: u64 = 200;

/// Composite cache key for one provider request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    provider: ProviderKind,
    /// Endpoint the request was sent to, so overrides never share entries.
    endpoint: String,
    /// Lowercased, trimmed query string.
    query: String,
    filters: FilterSet,
}

impl CacheKey {
    /// Build a deterministic cache key. The query is lowercased and trimmed.
    ///
    /// Requests still send the caller's casing, so queries differing only
    /// in case ("iPhone", "iphone") share one cached response. Provider
    /// search is case-insensitive, which makes that sharing harmless.
    pub fn new(provider: ProviderKind, endpoint: &str, query: &str, filters: &FilterSet) -> Self {
        Self {
            provider,
            endpoint: endpoint.to_string(),
            query: query.trim().to_lowercase(),
            filters: *filters,
        }
    }
}

/// Response cache shared by the adapters of one aggregator.
///
/// A TTL of zero disables caching entirely.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Option<Cache<CacheKey, SearchResult>>,
}

impl ResponseCache {
    /// Create a cache whose entries live for `ttl_seconds`.
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether this cache stores entries at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up a cached response. Returns `None` on miss or when disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<SearchResult> {
        match self.inner {
            Some(ref cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Insert a live response.
    pub async fn insert(&self, key: CacheKey, result: SearchResult) {
        if let Some(ref cache) = self.inner {
            cache.insert(key, result).await;
        }
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
