use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use guardian_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0).
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Plain DNS-over-UDP transport, used as the fallback when DoH fails per
/// §4.2 step 3. One ephemeral socket per query — this is the resolver's
/// fallback path, not its hot path.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("failed to bind UDP socket: {}", e)))?;

        tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| DomainError::UpstreamUnavailable(format!("timeout sending UDP query to {}", self.server_addr)))?
            .map_err(|e| DomainError::UpstreamUnavailable(format!("failed to send UDP query to {}: {}", self.server_addr, e)))?;

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (bytes_received, from_addr) = tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| DomainError::UpstreamUnavailable(format!("timeout waiting for UDP response from {}", self.server_addr)))?
            .map_err(|e| DomainError::UpstreamUnavailable(format!("failed to receive UDP response from {}: {}", self.server_addr, e)))?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(expected = %self.server_addr, received_from = %from_addr, "UDP response from unexpected source");
        }

        recv_buf.truncate(bytes_received);
        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
