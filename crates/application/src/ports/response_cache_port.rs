use ferrous_cache_domain::{CacheKey, DomainError};

/// Result of looking a key up in the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    /// The stored response was copied to the front of the output buffer.
    Hit { len: usize, expires_at: u64 },
    Miss,
    /// The entry exists but `now` is at or past its deadline.
    Expired,
    /// The entry exists but does not fit the caller's buffer.
    Oversized { len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    /// An entry for the key existed; its response and deadline were replaced.
    Refreshed,
    /// The store was full; the least recently written entry made room.
    InsertedWithEviction,
}

/// Port for the bounded, recency-ordered response store.
pub trait ResponseCachePort: Send + Sync {
    /// Copies the response cached under `key` into `out` when it is still
    /// fresh at `now` and fits. `out` is left untouched otherwise.
    fn copy_fresh(&self, key: &CacheKey, now: u64, out: &mut [u8]) -> CacheLookup;

    /// Stores `response` under `key` with a deadline of `now + lifetime`,
    /// making it the most recently written entry.
    ///
    /// On `Err` the store is unchanged.
    fn touch_or_insert(
        &self,
        key: CacheKey,
        response: &[u8],
        lifetime: u32,
        now: u64,
    ) -> Result<StoreOutcome, DomainError>;

    /// Floor applied to every stored lifetime.
    fn min_ttl(&self) -> u32;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
