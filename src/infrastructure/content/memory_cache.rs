//! In-memory LRU cache in front of a content fetcher.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{InscriptionId, RawPayload};
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentFetchPort;

/// Default maximum number of payloads kept in memory.
pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Caches successful fetches by inscription number.
///
/// Inscription content never changes once written, so entries need no
/// expiry. Failures are not cached.
pub struct CachedContentFetcher {
    inner: Arc<dyn ContentFetchPort>,
    cache: RwLock<LruCache<InscriptionId, RawPayload>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedContentFetcher {
    /// Wraps `inner` with a cache of `capacity` entries.
    #[must_use]
    pub fn new(inner: Arc<dyn ContentFetchPort>, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Best-effort number of cached payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.try_read().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached payload.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
        debug!("Cleared content cache");
    }
}

impl std::fmt::Debug for CachedContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedContentFetcher")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentFetchPort for CachedContentFetcher {
    async fn fetch(&self, id: InscriptionId) -> Result<RawPayload, ContentError> {
        if let Some(payload) = self.cache.write().await.get(&id).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Content cache hit");
            return Ok(payload);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(id = %id, "Content cache miss");

        let payload = self.inner.fetch(id).await?;
        self.cache.write().await.put(id, payload.clone());
        Ok(payload)
    }

    fn content_url(&self, id: InscriptionId) -> Option<String> {
        self.inner.content_url(id)
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached payloads.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} payloads, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}
