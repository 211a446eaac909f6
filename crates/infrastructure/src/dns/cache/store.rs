use super::entry::CacheEntry;
use super::metrics::{CacheMetrics, CacheStats};
use ferrous_cache_application::ports::{CacheLookup, ResponseCachePort, StoreOutcome};
use ferrous_cache_domain::{CacheConfig, CacheKey, ConfigError, DomainError};
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

type EntryMap = LruCache<CacheKey, CacheEntry, FxBuildHasher>;

/// Bounded response store ordered by write recency.
///
/// The most recently inserted or refreshed entry sits at the front of the
/// map; a full store evicts from the back. Lookups leave the order alone
/// unless `promote_on_read` is set, in which case a served entry moves to the
/// front as well.
///
/// A single mutex guards the map. Every critical section is a hash lookup
/// plus at most one response-sized copy.
pub struct LruResponseStore {
    entries: Mutex<EntryMap>,
    capacity: NonZeroUsize,
    min_ttl: u32,
    promote_on_read: bool,
    metrics: CacheMetrics,
}

impl LruResponseStore {
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let capacity =
            NonZeroUsize::new(config.capacity).ok_or_else(|| ConfigError::InvalidSetting {
                setting: "cache.capacity",
                reason: "must be at least 1".to_string(),
            })?;

        Ok(Self {
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            capacity,
            min_ttl: config.min_ttl,
            promote_on_read: config.promote_on_read,
            metrics: CacheMetrics::default(),
        })
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, EntryMap> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.len();
        self.metrics.snapshot(entries, self.capacity())
    }

    /// Expiry of the entry stored under `key`, without touching its position.
    pub fn expires_at(&self, key: &CacheKey) -> Option<u64> {
        self.lock().peek(key).map(CacheEntry::expires_at)
    }

    /// Keys from most to least recently written (or served, with
    /// `promote_on_read`).
    pub fn keys_by_recency(&self) -> Vec<CacheKey> {
        self.lock().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let purged = entries.len();
        entries.clear();
        purged
    }
}

impl ResponseCachePort for LruResponseStore {
    fn copy_fresh(&self, key: &CacheKey, now: u64, out: &mut [u8]) -> CacheLookup {
        let mut entries = self.lock();

        let (len, expires_at) = match entries.peek(key) {
            None => {
                CacheMetrics::record(&self.metrics.misses);
                return CacheLookup::Miss;
            }
            Some(entry) if !entry.is_fresh(now) => {
                CacheMetrics::record(&self.metrics.stale);
                return CacheLookup::Expired;
            }
            Some(entry) if entry.response().len() > out.len() => {
                CacheMetrics::record(&self.metrics.misses);
                return CacheLookup::Oversized {
                    len: entry.response().len(),
                };
            }
            Some(entry) => {
                let response = entry.response();
                out[..response.len()].copy_from_slice(response);
                (response.len(), entry.expires_at())
            }
        };

        if self.promote_on_read {
            entries.promote(key);
        }
        CacheMetrics::record(&self.metrics.hits);

        CacheLookup::Hit { len, expires_at }
    }

    fn touch_or_insert(
        &self,
        key: CacheKey,
        response: &[u8],
        lifetime: u32,
        now: u64,
    ) -> Result<StoreOutcome, DomainError> {
        let expires_at = now.saturating_add(u64::from(lifetime.max(self.min_ttl)));
        let mut entries = self.lock();

        if let Some(entry) = entries.peek_mut(&key) {
            if let Err(e) = entry.overwrite(response, expires_at) {
                CacheMetrics::record(&self.metrics.allocation_failures);
                return Err(e);
            }
            entries.promote(&key);
            CacheMetrics::record(&self.metrics.refreshes);
            debug!(key = %key, expires_at, "Refreshed cached response");
            return Ok(StoreOutcome::Refreshed);
        }

        let entry = match CacheEntry::allocate(response, expires_at) {
            Ok(entry) => entry,
            Err(e) => {
                CacheMetrics::record(&self.metrics.allocation_failures);
                return Err(e);
            }
        };

        CacheMetrics::record(&self.metrics.insertions);
        match entries.push(key, entry) {
            Some((evicted, _)) => {
                CacheMetrics::record(&self.metrics.evictions);
                debug!(evicted = %evicted, "Evicted least recently written response");
                Ok(StoreOutcome::InsertedWithEviction)
            }
            None => Ok(StoreOutcome::Inserted),
        }
    }

    fn min_ttl(&self) -> u32 {
        self.min_ttl
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
