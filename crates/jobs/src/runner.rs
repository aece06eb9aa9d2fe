use crate::{BlocklistSyncJob, FirewallSyncJob, StatsFlushJob, ThreatSyncJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_blocklist_sync(BlocklistSyncJob::new(update_blocklists))
///     .with_stats_flush(StatsFlushJob::new(stats_tracker))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    blocklist_sync: Option<BlocklistSyncJob>,
    threat_sync: Option<ThreatSyncJob>,
    firewall_sync: Option<FirewallSyncJob>,
    stats_flush: Option<StatsFlushJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            blocklist_sync: None,
            threat_sync: None,
            firewall_sync: None,
            stats_flush: None,
        }
    }

    pub fn with_blocklist_sync(mut self, job: BlocklistSyncJob) -> Self {
        self.blocklist_sync = Some(job);
        self
    }

    pub fn with_threat_sync(mut self, job: ThreatSyncJob) -> Self {
        self.threat_sync = Some(job);
        self
    }

    pub fn with_firewall_sync(mut self, job: FirewallSyncJob) -> Self {
        self.firewall_sync = Some(job);
        self
    }

    pub fn with_stats_flush(mut self, job: StatsFlushJob) -> Self {
        self.stats_flush = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.blocklist_sync {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.threat_sync {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.firewall_sync {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.stats_flush {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
