use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// align(64) ensures the struct starts on a cache-line boundary so that the
// lookup counters never share a line with the capture counters.
#[derive(Default)]
#[repr(align(64))]
pub struct CacheMetrics {
    // Hot counters: updated on every query.
    // hits(8) + misses(8) + stale(8) + _hot_pad(40) = 64 bytes.
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub stale: AtomicU64,
    _hot_pad: [u64; 5],

    // Cold counters: updated on cacheable responses.
    pub insertions: AtomicU64,
    pub refreshes: AtomicU64,
    pub evictions: AtomicU64,
    pub allocation_failures: AtomicU64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits
            + self.misses.load(AtomicOrdering::Relaxed) as f64
            + self.stale.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    #[inline]
    pub(crate) fn record(counter: &AtomicU64) {
        counter.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn snapshot(&self, entries: usize, capacity: usize) -> CacheStats {
        CacheStats {
            entries,
            capacity,
            hits: self.hits.load(AtomicOrdering::Relaxed),
            misses: self.misses.load(AtomicOrdering::Relaxed),
            stale: self.stale.load(AtomicOrdering::Relaxed),
            insertions: self.insertions.load(AtomicOrdering::Relaxed),
            refreshes: self.refreshes.load(AtomicOrdering::Relaxed),
            evictions: self.evictions.load(AtomicOrdering::Relaxed),
            allocation_failures: self.allocation_failures.load(AtomicOrdering::Relaxed),
            hit_rate: self.hit_rate(),
        }
    }
}

/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Lookups that found an expired entry.
    pub stale: u64,
    pub insertions: u64,
    pub refreshes: u64,
    pub evictions: u64,
    pub allocation_failures: u64,
    /// Percentage of lookups answered from the cache.
    pub hit_rate: f64,
}
