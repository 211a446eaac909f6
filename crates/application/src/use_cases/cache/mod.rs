mod capture_response;
mod serve_cached_response;

pub use capture_response::{CaptureResponseUseCase, MAX_TTL};
pub use serve_cached_response::ServeCachedResponseUseCase;
