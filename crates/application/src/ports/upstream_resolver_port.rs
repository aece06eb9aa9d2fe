use async_trait::async_trait;
use guardian_domain::{DnsQuery, DomainError};

/// A parsed upstream answer: the raw wire-format response plus the minimum
/// TTL across its answer records, used by the DNS Server (C6) to compute the
/// cache entry's lifetime.
#[derive(Debug, Clone)]
pub struct DnsAnswer {
    pub wire_bytes: Vec<u8>,
    pub min_ttl: u32,
}

/// Application-facing port for the Upstream Resolver (C2). SPEC_FULL.md
/// §4.2: DoH primary, UDP fallback, single query/parse/return per call.
#[async_trait]
pub trait UpstreamResolverPort: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError>;
}
