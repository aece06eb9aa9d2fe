use async_trait::async_trait;
use guardian_domain::DomainError;
use std::net::Ipv4Addr;

/// Application-facing port for the Reputation Client (C11): rate-limited,
/// cached single-IP lookups against a third-party provider. SPEC_FULL.md
/// §4.11. `None` covers every non-error "no answer" case (no API key,
/// rate-limited, provider failure) per the spec's algorithm.
#[async_trait]
pub trait ReputationClientPort: Send + Sync {
    async fn check(&self, ip: Ipv4Addr) -> Result<Option<guardian_domain::ReputationRecord>, DomainError>;
}
