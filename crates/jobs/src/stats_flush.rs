use guardian_application::ports::StatsTrackerPort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Stats Tracker (C7) background flush, SPEC_FULL.md §4.7: `flush` runs on
/// a fixed interval and is a no-op when the period is empty.
pub struct StatsFlushJob {
    tracker: Arc<dyn StatsTrackerPort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl StatsFlushJob {
    pub fn new(tracker: Arc<dyn StatsTrackerPort>) -> Self {
        Self {
            tracker,
            interval_secs: 300,
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
        info!(interval_secs = self.interval_secs, "Starting stats flush job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("StatsFlushJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.tracker.flush().await {
                            error!(error = %e, "stats flush failed");
                        }
                    }
                }
            }
        });
    }
}
