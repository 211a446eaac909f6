use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-cache.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-cache/config.toml";

/// Smallest packet buffer a DNS host may use (RFC 1035 UDP limit).
const MIN_PACKET_SIZE: usize = 512;

/// Main configuration structure for Ferrous Cache
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Response cache sizing and freshness policy
    #[serde(default)]
    pub cache: CacheConfig,

    /// Reference host (listen address, upstream)
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-cache.toml in current directory
    /// 3. /etc/ferrous-cache/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.server.upstream = upstream;
        }
        if let Some(capacity) = overrides.cache_capacity {
            self.cache.capacity = capacity;
        }
        if let Some(min_ttl) = overrides.min_ttl {
            self.cache.min_ttl = min_ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.capacity == 0 {
            return Err(ConfigError::InvalidSetting {
                setting: "cache.capacity",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidSetting {
                setting: "server.bind_address",
                reason: format!("'{}' is not an IP:port pair", self.server.bind_address),
            });
        }

        if self.server.upstream.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidSetting {
                setting: "server.upstream",
                reason: format!("'{}' is not an IP:port pair", self.server.upstream),
            });
        }

        if self.server.max_packet_size < MIN_PACKET_SIZE {
            return Err(ConfigError::InvalidSetting {
                setting: "server.max_packet_size",
                reason: format!("must be at least {} bytes", MIN_PACKET_SIZE),
            });
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub cache_capacity: Option<usize>,
    pub min_ttl: Option<u32>,
    pub log_level: Option<String>,
}
