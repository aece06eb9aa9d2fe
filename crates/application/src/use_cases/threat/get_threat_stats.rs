use std::sync::Arc;

use chrono::Utc;
use guardian_domain::DomainError;

use crate::ports::threat_store_port::{ThreatStatsSummary, ThreatStorePort};

/// Threat Ingestor `stats()` (C10), SPEC_FULL.md §4.10 and §10.7.
pub struct GetThreatStatsUseCase {
    store: Arc<dyn ThreatStorePort>,
}

impl GetThreatStatsUseCase {
    pub fn new(store: Arc<dyn ThreatStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<ThreatStatsSummary, DomainError> {
        let now = Utc::now().to_rfc3339();
        let active = self.store.active_indicators(&now).await?;
        let feeds = self.store.list_feeds().await?;

        let mut summary = ThreatStatsSummary {
            total_active_indicators: active.len() as u64,
            total_feeds: feeds.len() as u64,
            enabled_feeds: feeds.iter().filter(|f| f.enabled).count() as u64,
            ..Default::default()
        };

        if !active.is_empty() {
            let sum: f64 = active.iter().map(|i| i.threat_score).sum();
            summary.mean_active_score = sum / active.len() as f64;

            for indicator in &active {
                if indicator.threat_score >= 0.7 {
                    summary.high += 1;
                } else if indicator.threat_score >= 0.4 {
                    summary.medium += 1;
                } else {
                    summary.low += 1;
                }
            }
        }

        Ok(summary)
    }
}
