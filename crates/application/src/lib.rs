//! Ferrous Cache Application Layer
//!
//! The two decision procedures of the response cache, written against the
//! [`ports::ResponseCachePort`] and [`ports::ClockPort`] seams.
pub mod ports;
pub mod use_cases;
