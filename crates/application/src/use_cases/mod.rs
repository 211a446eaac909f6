pub mod cache;

// Re-export use cases
pub use cache::{CaptureResponseUseCase, ServeCachedResponseUseCase, MAX_TTL};
