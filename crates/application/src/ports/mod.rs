mod clock_port;
mod response_cache_port;

pub use clock_port::ClockPort;
pub use response_cache_port::{CacheLookup, ResponseCachePort, StoreOutcome};
