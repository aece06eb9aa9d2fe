use guardian_application::{SyncPortRulesUseCase, SyncThreatRulesUseCase};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Firewall Service auto-sync (C12), SPEC_FULL.md §4.12: threat-derived
/// rules every tick, high-risk-port rules once at start-up since the port
/// table is a compile-time constant and never changes between ticks.
pub struct FirewallSyncJob {
    sync_threat_rules: Arc<SyncThreatRulesUseCase>,
    sync_port_rules: Arc<SyncPortRulesUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl FirewallSyncJob {
    pub fn new(
        sync_threat_rules: Arc<SyncThreatRulesUseCase>,
        sync_port_rules: Arc<SyncPortRulesUseCase>,
    ) -> Self {
        Self {
            sync_threat_rules,
            sync_port_rules,
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
        info!(interval_secs = self.interval_secs, "Starting firewall sync job");

        match self.sync_port_rules.execute().await {
            Ok(inserted) => info!(inserted, "high-risk port rules synced"),
            Err(e) => error!(error = %e, "port rule sync failed"),
        }

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("FirewallSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.sync_threat_rules.execute().await {
                            Ok(inserted) => info!(inserted, "threat-derived firewall rules synced"),
                            Err(e) => error!(error = %e, "threat rule sync failed"),
                        }
                    }
                }
            }
        });
    }
}
