use super::response_cache::ResponseCache;
use super::transport::{TransportError, UdpTransport};
use ferrous_cache_domain::{FilterOutcome, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

/// UDP forwarding proxy that runs every query and response through a
/// [`ResponseCache`].
pub struct UdpCacheProxy {
    socket: Arc<UdpSocket>,
    cache: Arc<ResponseCache>,
    upstream: UdpTransport,
    upstream_timeout: Duration,
    max_packet_size: usize,
}

impl UdpCacheProxy {
    pub async fn bind(config: &ServerConfig, cache: Arc<ResponseCache>) -> Result<Self, TransportError> {
        let bind_addr = parse_addr(&config.bind_address)?;
        let upstream_addr = parse_addr(&config.upstream)?;

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|source| TransportError::Bind {
                addr: bind_addr,
                source,
            })?;

        Ok(Self {
            socket: Arc::new(socket),
            cache,
            upstream: UdpTransport::new(upstream_addr, config.max_packet_size),
            upstream_timeout: Duration::from_millis(config.upstream_timeout_ms),
            max_packet_size: config.max_packet_size,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.socket.local_addr().map_err(TransportError::LocalAddr)
    }

    /// Receives datagrams until the task is cancelled. Each datagram is
    /// handled on its own task.
    pub async fn run(self: Arc<Self>) -> Result<(), TransportError> {
        info!(
            addr = %self.local_addr()?,
            upstream = %self.upstream.server_addr(),
            "UDP cache proxy listening"
        );

        let mut recv_buf = vec![0u8; self.max_packet_size];
        loop {
            let (len, peer) = match self.socket.recv_from(&mut recv_buf).await {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "Failed to receive datagram");
                    continue;
                }
            };

            let mut packet = vec![0u8; self.max_packet_size];
            packet[..len].copy_from_slice(&recv_buf[..len]);

            let proxy = Arc::clone(&self);
            tokio::spawn(async move {
                proxy.handle_datagram(packet, len, peer).await;
            });
        }
    }

    async fn handle_datagram(&self, mut packet: Vec<u8>, len: usize, peer: SocketAddr) {
        match self.cache.on_query(&mut packet, len) {
            Ok(FilterOutcome::Replaced { len }) => {
                debug!(client = %peer, len, "Answering from cache");
                self.reply(&packet[..len], peer).await;
            }
            Ok(FilterOutcome::Pass) => self.forward(&packet[..len], peer).await,
            Err(e) => warn!(client = %peer, error = %e, "Dropping malformed query"),
        }
    }

    async fn forward(&self, query: &[u8], peer: SocketAddr) {
        let response = match self.upstream.send(query, self.upstream_timeout).await {
            Ok(response) => response,
            Err(e) => {
                warn!(client = %peer, error = %e, "Upstream exchange failed");
                return;
            }
        };

        match self.cache.on_response(&response) {
            Ok(_) => self.reply(&response, peer).await,
            Err(e) => warn!(client = %peer, error = %e, "Dropping malformed upstream response"),
        }
    }

    async fn reply(&self, bytes: &[u8], peer: SocketAddr) {
        if let Err(e) = self.socket.send_to(bytes, peer).await {
            warn!(client = %peer, error = %e, "Failed to send response");
        }
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr, TransportError> {
    addr.parse()
        .map_err(|_| TransportError::InvalidAddress(addr.to_string()))
}
