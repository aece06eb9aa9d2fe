use async_trait::async_trait;
use guardian_application::ports::StatsTrackerPort;
use guardian_domain::{DecisionReason, DomainError, StatsSummary, Verdict};
use guardian_jobs::StatsFlushJob;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

struct CountingStatsTracker {
    flush_count: AtomicU32,
}

#[async_trait]
impl StatsTrackerPort for CountingStatsTracker {
    fn record_query(&self, _domain: &str, _verdict: Verdict, _reason: DecisionReason, _is_cache_hit: bool) {}

    async fn flush(&self) -> Result<(), DomainError> {
        self.flush_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn summary(&self) -> StatsSummary {
        StatsSummary::default()
    }
}

#[tokio::test]
async fn flushes_on_every_tick_until_cancelled() {
    let tracker = Arc::new(CountingStatsTracker { flush_count: AtomicU32::new(0) });
    let shutdown = CancellationToken::new();

    let job = Arc::new(
        StatsFlushJob::new(tracker.clone())
            .with_interval(1)
            .with_cancellation(shutdown.clone()),
    );
    job.start().await;

    sleep(Duration::from_millis(2_500)).await;
    shutdown.cancel();
    sleep(Duration::from_millis(100)).await;

    assert!(tracker.flush_count.load(Ordering::SeqCst) >= 2);
}
