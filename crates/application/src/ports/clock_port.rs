/// Source of the current time, in whole seconds.
///
/// Each filter call reads it once so that every freshness comparison within
/// that call sees the same "now".
pub trait ClockPort: Send + Sync {
    fn now_secs(&self) -> u64;
}
