//! Ferrous Cache Domain Layer
pub mod cache_key;
pub mod config;
pub mod dns_wire;
pub mod errors;
pub mod filter;

pub use cache_key::CacheKey;
pub use config::{CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, ServerConfig};
pub use dns_wire::{next_record, skip_name, PacketHeader, RecordFields, RecordForm};
pub use errors::DomainError;
pub use filter::FilterOutcome;
