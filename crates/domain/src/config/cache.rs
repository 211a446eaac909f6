use serde::{Deserialize, Serialize};

/// Response cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of cached responses (default: 50)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Floor, in seconds, applied to every stored lifetime (default: 60)
    /// Keeps records with tiny advertised TTLs from expiring on every query.
    #[serde(default = "default_min_ttl")]
    pub min_ttl: u32,

    /// Move an entry to the front of the eviction order when it is served,
    /// not only when it is written (default: false)
    #[serde(default)]
    pub promote_on_read: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            min_ttl: default_min_ttl(),
            promote_on_read: false,
        }
    }
}

impl CacheConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_min_ttl(mut self, min_ttl: u32) -> Self {
        self.min_ttl = min_ttl;
        self
    }

    pub fn with_promote_on_read(mut self, promote_on_read: bool) -> Self {
        self.promote_on_read = promote_on_read;
        self
    }
}

fn default_capacity() -> usize {
    50
}

fn default_min_ttl() -> u32 {
    60
}
