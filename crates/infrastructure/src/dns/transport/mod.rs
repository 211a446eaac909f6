pub mod udp;

use std::net::SocketAddr;
use thiserror::Error;

pub use udp::UdpTransport;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid socket address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Failed to read local socket address: {0}")]
    LocalAddr(std::io::Error),

    #[error("Timeout talking to {0}")]
    Timeout(SocketAddr),

    #[error("I/O error talking to {addr}: {source}")]
    Io {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Response from {0} does not match the query ID")]
    IdMismatch(SocketAddr),
}
