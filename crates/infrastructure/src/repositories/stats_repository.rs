use async_trait::async_trait;
use guardian_application::ports::StatsTrackerPort;
use guardian_domain::query_log::LifetimeCounters;
use guardian_domain::{DecisionReason, DomainError, PeriodCounters, StatsSummary, Verdict};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tracing::instrument;

/// Stats Tracker (C7): in-memory period counters behind a `Mutex`, flushed
/// to `guardian_query_stats`/`guardian_top_domains` on an hourly cadence by
/// a scheduled job. SPEC_FULL.md §4.7.
pub struct SqliteStatsTracker {
    pool: SqlitePool,
    period: Mutex<PeriodCounters>,
    lifetime: Mutex<LifetimeCounters>,
}

impl SqliteStatsTracker {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            period: Mutex::new(PeriodCounters::default()),
            lifetime: Mutex::new(LifetimeCounters::default()),
        }
    }
}

#[async_trait]
impl StatsTrackerPort for SqliteStatsTracker {
    fn record_query(&self, domain: &str, verdict: Verdict, reason: DecisionReason, is_cache_hit: bool) {
        let mut period = self.period.lock().unwrap_or_else(|e| e.into_inner());
        let mut lifetime = self.lifetime.lock().unwrap_or_else(|e| e.into_inner());

        period.total += 1;
        lifetime.total += 1;
        if is_cache_hit {
            period.cache_hits += 1;
            lifetime.cache_hits += 1;
        }
        match verdict {
            Verdict::Allow => {
                period.allowed += 1;
                lifetime.allowed += 1;
            }
            Verdict::Block => {
                period.blocked += 1;
                lifetime.blocked += 1;
                if matches!(reason, DecisionReason::Blocklist | DecisionReason::CustomBlock) {
                    *period.blocked_by_domain.entry(Arc::from(domain)).or_insert(0) += 1;
                }
            }
            Verdict::Error => {}
        }
    }

    #[instrument(skip(self))]
    async fn flush(&self) -> Result<(), DomainError> {
        let snapshot = {
            let mut period = self.period.lock().unwrap_or_else(|e| e.into_inner());
            if period.is_empty() {
                return Ok(());
            }
            let snapshot = period.clone();
            period.reset();
            snapshot
        };

        let now = chrono::Utc::now();
        let date = now.format("%Y-%m-%d").to_string();
        let hour = now.format("%H").to_string().parse::<i64>().unwrap_or(0);

        sqlx::query(
            "INSERT INTO guardian_query_stats (date, hour, total_queries, blocked_queries, allowed_queries, cache_hits)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(date, hour) DO UPDATE SET
                total_queries = total_queries + excluded.total_queries,
                blocked_queries = blocked_queries + excluded.blocked_queries,
                allowed_queries = allowed_queries + excluded.allowed_queries,
                cache_hits = cache_hits + excluded.cache_hits",
        )
        .bind(&date)
        .bind(hour)
        .bind(snapshot.total as i64)
        .bind(snapshot.blocked as i64)
        .bind(snapshot.allowed as i64)
        .bind(snapshot.cache_hits as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        let now_iso = now.to_rfc3339();
        for (domain, count) in &snapshot.blocked_by_domain {
            sqlx::query(
                "INSERT INTO guardian_top_domains (domain, block_count, category, last_blocked)
                 VALUES (?, ?, '', ?)
                 ON CONFLICT(domain) DO UPDATE SET
                    block_count = block_count + excluded.block_count,
                    last_blocked = excluded.last_blocked",
            )
            .bind(domain.as_ref())
            .bind(*count as i64)
            .bind(&now_iso)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        }

        Ok(())
    }

    fn summary(&self) -> StatsSummary {
        let period = self.period.lock().unwrap_or_else(|e| e.into_inner()).clone();
        let lifetime = self.lifetime.lock().unwrap_or_else(|e| e.into_inner()).clone();

        let mut top_blocked: Vec<(Arc<str>, u64)> = period
            .blocked_by_domain
            .iter()
            .map(|(domain, count)| (domain.clone(), *count))
            .collect();
        top_blocked.sort_by(|a, b| b.1.cmp(&a.1));
        top_blocked.truncate(10);

        StatsSummary { period, lifetime, top_blocked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_allow_and_block_into_period_and_lifetime() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let tracker = SqliteStatsTracker::new(pool);
        tracker.record_query("good.example.com", Verdict::Allow, DecisionReason::DefaultAllow, false);
        tracker.record_query("evil.example.com", Verdict::Block, DecisionReason::Blocklist, false);
        let summary = tracker.summary();
        assert_eq!(summary.period.total, 2);
        assert_eq!(summary.period.blocked, 1);
        assert_eq!(summary.lifetime.total, 2);
        assert_eq!(summary.top_blocked[0].0.as_ref(), "evil.example.com");
    }
}
