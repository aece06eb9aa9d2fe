use guardian_application::SyncAllFeedsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Threat Ingestor `sync_all()` (C10), SPEC_FULL.md §4.10, run on a ticker.
pub struct ThreatSyncJob {
    sync_all: Arc<SyncAllFeedsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ThreatSyncJob {
    pub fn new(sync_all: Arc<SyncAllFeedsUseCase>) -> Self {
        Self {
            sync_all,
            interval_secs: 3_600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting threat feed sync job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ThreatSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.sync_all.execute().await {
                            Ok(report) => info!(
                                subnets_updated = report.subnets_updated,
                                expired_removed = report.expired_removed,
                                "threat feed sync completed"
                            ),
                            Err(e) => error!(error = %e, "threat feed sync failed"),
                        }
                    }
                }
            }
        });
    }
}
