pub mod https;
pub mod udp;

use async_trait::async_trait;
use guardian_domain::DomainError;
use std::time::Duration;

/// Result of a raw DNS transport operation.
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format).
    pub bytes: Vec<u8>,
    /// Which protocol was used.
    pub protocol_used: &'static str,
}

/// Sends a wire-format DNS message and awaits one wire-format reply.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
