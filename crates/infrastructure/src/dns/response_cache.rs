use super::cache::{CacheStats, LruResponseStore, SystemClock};
use ferrous_cache_application::ports::{ClockPort, ResponseCachePort};
use ferrous_cache_application::use_cases::{CaptureResponseUseCase, ServeCachedResponseUseCase};
use ferrous_cache_domain::{CacheConfig, ConfigError, DomainError, FilterOutcome};
use std::sync::Arc;
use tracing::info;

pub const DESCRIPTION: &str = "Cache DNS responses";

pub const LONG_DESCRIPTION: &str = "Keeps recent DNS responses in a bounded in-memory cache and \
answers repeated queries directly. Cached answers carry the query's transaction ID and name \
and the remaining lifetime as their TTL. Responses live for the smallest TTL they carry, but \
never less than the configured minimum. Truncated responses and errors other than NXDOMAIN are \
not cached. Queries with the DNSSEC OK bit are cached apart from those without it.";

/// Handle owning one response cache and the two filters that share it.
///
/// `on_query` runs on every client query before it is forwarded, and
/// `on_response` on every upstream response before it is relayed. Both may
/// be called concurrently from any number of tasks.
pub struct ResponseCache {
    store: Arc<LruResponseStore>,
    serve: ServeCachedResponseUseCase,
    capture: CaptureResponseUseCase,
}

impl ResponseCache {
    pub fn init(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn ClockPort>) -> Result<Self, ConfigError> {
        let store = Arc::new(LruResponseStore::new(config)?);
        let port: Arc<dyn ResponseCachePort> = store.clone();

        info!(
            capacity = config.capacity,
            min_ttl = config.min_ttl,
            promote_on_read = config.promote_on_read,
            "Response cache initialized"
        );

        Ok(Self {
            serve: ServeCachedResponseUseCase::new(Arc::clone(&port), Arc::clone(&clock)),
            capture: CaptureResponseUseCase::new(port, clock),
            store,
        })
    }

    /// Query filter. `buf.len()` is the largest answer the caller can send;
    /// the query occupies `buf[..len]`.
    pub fn on_query(&self, buf: &mut [u8], len: usize) -> Result<FilterOutcome, DomainError> {
        self.serve.execute(buf, len)
    }

    /// Response filter. Never alters the response.
    pub fn on_response(&self, packet: &[u8]) -> Result<FilterOutcome, DomainError> {
        self.capture.execute(packet)
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&self) {
        let purged = self.store.clear();
        info!(entries = purged, "Response cache cleared");
    }

    /// Releases every entry and the handle itself, returning the final
    /// counters.
    pub fn destroy(self) -> CacheStats {
        let stats = self.stats();
        let purged = self.store.clear();
        info!(
            entries = purged,
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = stats.hit_rate,
            "Response cache destroyed"
        );
        stats
    }
}
