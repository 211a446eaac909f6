pub mod cache;
pub mod response_cache;
pub mod server;
pub mod transport;

pub use cache::{CacheEntry, CacheMetrics, CacheStats, LruResponseStore, ManualClock, SystemClock};
pub use response_cache::{ResponseCache, DESCRIPTION, LONG_DESCRIPTION};
pub use server::UdpCacheProxy;
pub use transport::{TransportError, UdpTransport};
