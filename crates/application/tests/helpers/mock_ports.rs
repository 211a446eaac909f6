use ferrous_cache_application::ports::{
    CacheLookup, ClockPort, ResponseCachePort, StoreOutcome,
};
use ferrous_cache_domain::{CacheKey, DomainError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub key: CacheKey,
    pub lifetime: u32,
    pub now: u64,
}

/// Unbounded in-memory cache with the same freshness rules as the real store.
pub struct MockResponseCache {
    entries: Mutex<HashMap<CacheKey, (Vec<u8>, u64)>>,
    calls: Mutex<Vec<StoreCall>>,
    min_ttl: u32,
    fail_inserts: AtomicBool,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self::with_min_ttl(60)
    }

    pub fn with_min_ttl(min_ttl: u32) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            min_ttl,
            fail_inserts: AtomicBool::new(false),
        }
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn seed(&self, key: CacheKey, response: Vec<u8>, expires_at: u64) {
        self.entries
            .lock()
            .unwrap()
            .insert(key, (response, expires_at));
    }

    pub fn stored(&self, key: &CacheKey) -> Option<(Vec<u8>, u64)> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<StoreCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Default for MockResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCachePort for MockResponseCache {
    fn copy_fresh(&self, key: &CacheKey, now: u64, out: &mut [u8]) -> CacheLookup {
        let entries = self.entries.lock().unwrap();
        let Some((response, expires_at)) = entries.get(key) else {
            return CacheLookup::Miss;
        };
        if *expires_at <= now {
            return CacheLookup::Expired;
        }
        if response.len() > out.len() {
            return CacheLookup::Oversized {
                len: response.len(),
            };
        }
        out[..response.len()].copy_from_slice(response);
        CacheLookup::Hit {
            len: response.len(),
            expires_at: *expires_at,
        }
    }

    fn touch_or_insert(
        &self,
        key: CacheKey,
        response: &[u8],
        lifetime: u32,
        now: u64,
    ) -> Result<StoreOutcome, DomainError> {
        self.calls.lock().unwrap().push(StoreCall {
            key: key.clone(),
            lifetime,
            now,
        });
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::AllocationFailed(response.len()));
        }
        let previous = self
            .entries
            .lock()
            .unwrap()
            .insert(key, (response.to_vec(), now + lifetime as u64));
        Ok(match previous {
            Some(_) => StoreOutcome::Refreshed,
            None => StoreOutcome::Inserted,
        })
    }

    fn min_ttl(&self) -> u32 {
        self.min_ttl
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl ClockPort for FixedClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
