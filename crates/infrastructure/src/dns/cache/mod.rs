pub mod clock;
pub mod entry;
pub mod metrics;
pub mod store;

pub use clock::{ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use metrics::{CacheMetrics, CacheStats};
pub use store::LruResponseStore;
