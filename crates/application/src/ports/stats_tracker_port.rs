use async_trait::async_trait;
use guardian_domain::{DecisionReason, DomainError, StatsSummary, Verdict};

/// Application-facing port for the Stats Tracker (C7): in-memory period
/// counters with periodic flush to persistence. SPEC_FULL.md §4.7.
#[async_trait]
pub trait StatsTrackerPort: Send + Sync {
    fn record_query(
        &self,
        domain: &str,
        verdict: Verdict,
        reason: DecisionReason,
        is_cache_hit: bool,
    );

    /// Persists the current period counters and zeroes them. A no-op when
    /// the period is empty.
    async fn flush(&self) -> Result<(), DomainError>;

    fn summary(&self) -> StatsSummary;
}
