use async_trait::async_trait;
use guardian_domain::DomainError;
use std::sync::Arc;

/// One indicator as emitted directly by a feed parser, before subnet
/// aggregation. SPEC_FULL.md §4.9.
#[derive(Debug, Clone)]
pub struct ParsedIndicator {
    pub ip: std::net::Ipv4Addr,
    pub indicator_type: Arc<str>,
}

/// Self-registration metadata a parser exposes so the ingestor never depends
/// on an externally-seeded `threat_feeds` table (SPEC_FULL.md §4.9, §10.7).
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub name: Arc<str>,
    pub feed_url: Arc<str>,
    pub feed_type: Arc<str>,
}

/// Application-facing port for a single Feed Parser (C9). One implementation
/// per source family (plain IP list, IOC JSON API, blacklist API).
#[async_trait]
pub trait FeedParserPort: Send + Sync {
    fn feed_config(&self) -> FeedConfig;

    async fn fetch(&self) -> Result<Vec<ParsedIndicator>, DomainError>;
}
