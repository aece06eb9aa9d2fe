use guardian_application::UpdateAllBlocklistsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodic blocklist refresh (C3), SPEC_FULL.md §4.3. Default interval
/// matches `GUARDIAN_BLOCKLIST_UPDATE_HOURS`'s default of 24h.
pub struct BlocklistSyncJob {
    update: Arc<UpdateAllBlocklistsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl BlocklistSyncJob {
    pub fn new(update: Arc<UpdateAllBlocklistsUseCase>) -> Self {
        Self {
            update,
            interval_secs: 86_400,
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
        info!(interval_secs = self.interval_secs, "Starting blocklist sync job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlocklistSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.update.execute().await {
                            Ok(count) => info!(entries = count, "blocklist sync completed"),
                            Err(e) => error!(error = %e, "blocklist sync failed"),
                        }
                    }
                }
            }
        });
    }
}
