//! Ferrous Cache Infrastructure Layer
pub mod dns;

pub use dns::{
    CacheMetrics, CacheStats, LruResponseStore, ResponseCache, SystemClock, UdpCacheProxy,
    DESCRIPTION, LONG_DESCRIPTION,
};
