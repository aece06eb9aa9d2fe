use super::transport::{https::HttpsTransport, udp::UdpTransport, DnsTransport};
use super::wire::{min_ttl, MessageBuilder};
use async_trait::async_trait;
use guardian_application::ports::{DnsAnswer, UpstreamResolverPort};
use guardian_domain::config::DnsConfig;
use guardian_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Upstream Resolver (C2): DoH primary, UDP fallback, one query/parse/return
/// per call. No connection state survives across calls beyond the shared
/// HTTP client `HttpsTransport` already keeps alive internally.
pub struct DohResolver {
    https: HttpsTransport,
    udp_fallback: SocketAddr,
    timeout: Duration,
}

impl DohResolver {
    pub fn new(cfg: &DnsConfig) -> Result<Self, DomainError> {
        let udp_fallback: SocketAddr = format!("{}:53", cfg.upstream_fallback)
            .parse()
            .map_err(|e| DomainError::InvalidConfig(format!("invalid upstream_fallback: {}", e)))?;

        Ok(Self {
            https: HttpsTransport::new(cfg.upstream_doh.clone()),
            udp_fallback,
            timeout: Duration::from_millis(cfg.resolve_timeout_ms),
        })
    }
}

#[async_trait]
impl UpstreamResolverPort for DohResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        let (_, wire_query) = MessageBuilder::build_query(&query.domain, &query.record_type)?;

        let response = match self.https.send(&wire_query, self.timeout).await {
            Ok(r) => r,
            Err(e) => {
                warn!(domain = %query.domain, error = %e, "DoH query failed, falling back to UDP");
                let udp = UdpTransport::new(self.udp_fallback);
                udp.send(&wire_query, self.timeout).await?
            }
        };

        let ttl = min_ttl(&response.bytes)?;
        debug!(domain = %query.domain, protocol = response.protocol_used, ttl, "upstream query resolved");

        Ok(DnsAnswer {
            wire_bytes: response.bytes,
            min_ttl: ttl,
        })
    }
}
