//! TTL cache in front of remote document fetches using moka
//!
//! Entries are keyed by `owner/repository/path` and hold the decoded file
//! body. Freshness is checked on every lookup against the instance TTL; moka's
//! own `time_to_live` uses the same bound so stale entries are also evicted
//! in the background.

use crate::client::{extract_content, ContentSource};
use crate::error::RemoteResult;
use crate::location::RemoteLocation;
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default freshness window
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

const MAX_ENTRIES: u64 = 1_000;

/// One fetched document and when it was fetched
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    content: Arc<str>,
    fetched_at: Instant,
}

impl CacheEntry {
    fn new(content: &str) -> Self {
        Self {
            content: Arc::from(content),
            fetched_at: Instant::now(),
        }
    }

    /// Decoded document text
    #[inline]
    #[must_use]
    pub(crate) fn content(&self) -> &str {
        &self.content
    }

    /// Whether more than `ttl` has elapsed since the fetch
    #[inline]
    #[must_use]
    pub(crate) fn is_stale(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from a fresh entry
    pub hits: u64,
    /// Lookups that went to the source
    pub misses: u64,
    /// Approximate number of entries held
    pub entry_count: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    last_hit: AtomicBool,
}

impl Counters {
    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        self.last_hit.store(hit, Ordering::Relaxed);
    }
}

/// Remote document cache
///
/// Cloning yields another handle onto the same entries and counters.
#[derive(Debug, Clone)]
pub struct RemoteFetchCache {
    source: Arc<dyn ContentSource>,
    entries: Cache<String, CacheEntry>,
    ttl: Duration,
    counters: Arc<Counters>,
}

impl RemoteFetchCache {
    /// Cache with the default five minute TTL
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_ttl(source, DEFAULT_TTL)
    }

    /// Cache with a custom TTL
    #[must_use]
    pub fn with_ttl(source: Arc<dyn ContentSource>, ttl: Duration) -> Self {
        Self {
            source,
            entries: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(ttl)
                .build(),
            ttl,
            counters: Arc::default(),
        }
    }

    /// Freshness window for this instance
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch and decode a document, serving a fresh cached copy when present
    ///
    /// # Errors
    /// `RemoteError::InvalidArgument` for blank parts, otherwise any failure
    /// from the source or from decoding its response
    pub async fn fetch(&self, owner: &str, repository: &str, path: &str) -> RemoteResult<String> {
        let location = RemoteLocation::new(owner, repository, path)?;
        self.fetch_location(&location).await
    }

    /// Same as [`fetch`](Self::fetch) for an already validated location
    ///
    /// # Errors
    /// Any failure from the source or from decoding its response
    pub async fn fetch_location(&self, location: &RemoteLocation) -> RemoteResult<String> {
        let key = location.cache_key();

        if let Some(entry) = self.entries.get(&key).await {
            if entry.is_stale(self.ttl) {
                self.entries.invalidate(&key).await;
            } else {
                self.counters.record(true);
                tracing::debug!(%key, "remote cache hit");
                return Ok(entry.content().to_owned());
            }
        }

        self.counters.record(false);
        tracing::debug!(%key, "remote cache miss");

        let body = self.source.fetch_raw(location).await?;
        let content = extract_content(&body)?;
        self.entries.insert(key, CacheEntry::new(&content)).await;
        Ok(content)
    }

    /// Whether a fresh entry exists; blank arguments are never cached
    pub async fn is_cached(&self, owner: &str, repository: &str, path: &str) -> bool {
        let Ok(location) = RemoteLocation::new(owner, repository, path) else {
            return false;
        };
        self.entries
            .get(&location.cache_key())
            .await
            .is_some_and(|entry| !entry.is_stale(self.ttl))
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.invalidate_all();
        tracing::debug!("remote cache cleared");
    }

    /// Whether the most recent fetch was served from the cache
    #[inline]
    #[must_use]
    pub fn last_was_cache_hit(&self) -> bool {
        self.counters.last_hit.load(Ordering::Relaxed)
    }

    /// Hit, miss and entry counts
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            entry_count: self.entries.entry_count(),
        }
    }

    /// Flush moka's pending maintenance so `stats().entry_count` is current
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }
}
