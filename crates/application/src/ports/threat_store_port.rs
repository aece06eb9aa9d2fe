use async_trait::async_trait;
use guardian_domain::{DomainError, ThreatFeed, ThreatIndicator};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// A /24-subnet's raw aggregate for one sync pass, before scoring.
#[derive(Debug, Clone, Default)]
pub struct SubnetAggregate {
    pub representative_ip: Option<std::net::Ipv4Addr>,
    pub feeds: BTreeSet<Arc<str>>,
    pub types: BTreeSet<Arc<str>>,
}

/// Score-band distribution over active indicators, SPEC_FULL.md §4.10
/// `stats()` — `high >= 0.7`, `medium in [0.4, 0.7)`, `low < 0.4`.
#[derive(Debug, Clone, Default)]
pub struct ThreatStatsSummary {
    pub total_active_indicators: u64,
    pub total_feeds: u64,
    pub enabled_feeds: u64,
    pub mean_active_score: f64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// Application-facing port for the Threat Ingestor's persistence side
/// (C10). Aggregation and scoring are pure application logic; this port
/// only knows how to read/write rows.
#[async_trait]
pub trait ThreatStorePort: Send + Sync {
    async fn ensure_feed_registered(
        &self,
        name: &str,
        feed_url: &str,
        feed_type: &str,
    ) -> Result<(), DomainError>;

    async fn list_feeds(&self) -> Result<Vec<ThreatFeed>, DomainError>;

    async fn mark_feed_synced(&self, name: &str, entries_count: u64) -> Result<(), DomainError>;

    /// Merge `aggregate` into the row for `subnet_hash`, or insert a new one
    /// if absent, recomputing score and extending `expires_at`. Returns the
    /// updated indicator.
    async fn upsert_indicator(
        &self,
        subnet_hash: &str,
        subnet_prefix: Option<&str>,
        aggregate: &SubnetAggregate,
        score: f64,
        expires_at: &str,
    ) -> Result<ThreatIndicator, DomainError>;

    async fn get_indicator(&self, subnet_hash: &str) -> Result<Option<ThreatIndicator>, DomainError>;

    /// Deletes expired rows, returning the number removed.
    async fn delete_expired(&self, now: &str) -> Result<u64, DomainError>;

    async fn active_indicators(&self, now: &str) -> Result<Vec<ThreatIndicator>, DomainError>;

    /// Subnets scoring at or above `threshold`, used by `sync_threat_rules`.
    async fn high_score_subnets(
        &self,
        threshold: f64,
        now: &str,
    ) -> Result<HashMap<Arc<str>, ThreatIndicator>, DomainError>;
}
