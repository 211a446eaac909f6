use serde::{Deserialize, Serialize};

/// Reference host configuration: where to listen and where to forward misses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// UDP address the proxy listens on (default: "127.0.0.1:5353")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Upstream resolver receiving cache misses (default: "9.9.9.9:53")
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// How long to wait for an upstream answer, in milliseconds (default: 2000)
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Size of the per-packet buffer; bounds the answers that can be served
    /// from cache (default: 4096)
    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            upstream: default_upstream(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            max_packet_size: default_max_packet_size(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5353".to_string()
}

fn default_upstream() -> String {
    "9.9.9.9:53".to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    2000
}

fn default_max_packet_size() -> usize {
    4096
}
