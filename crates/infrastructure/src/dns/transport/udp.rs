//! UDP exchange with the upstream resolver (RFC 1035 §4.2.1).
//!
//! Messages are sent as-is (no framing). Each exchange uses its own
//! ephemeral socket so concurrent queries never read each other's replies.

use super::TransportError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

pub struct UdpTransport {
    server_addr: SocketAddr,
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, max_response_size: usize) -> Self {
        Self {
            server_addr,
            max_response_size,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Sends one query and waits for the matching response.
    pub async fn send(&self, message: &[u8], timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|source| TransportError::Bind {
                addr: bind_addr,
                source,
            })?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message, self.server_addr))
            .await
            .map_err(|_| TransportError::Timeout(self.server_addr))?
            .map_err(|source| TransportError::Io {
                addr: self.server_addr,
                source,
            })?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; self.max_response_size];
        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| TransportError::Timeout(self.server_addr))?
                .map_err(|source| TransportError::Io {
                    addr: self.server_addr,
                    source,
                })?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        if bytes_received < 2 || message.len() < 2 || recv_buf[..2] != message[..2] {
            return Err(TransportError::IdMismatch(self.server_addr));
        }

        recv_buf.truncate(bytes_received);
        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}
