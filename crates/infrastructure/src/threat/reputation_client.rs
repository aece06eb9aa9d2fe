use async_trait::async_trait;
use guardian_application::ports::ReputationClientPort;
use guardian_domain::{DomainError, ReputationRecord};
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, error, warn};

const ABUSEIPDB_BASE_URL: &str = "https://api.abuseipdb.com/api/v2";
const MAX_AGE_DAYS: u32 = 90;
const CACHE_TTL_SECS: i64 = 3600;

/// AbuseIPDB-backed Reputation Client (C11): daily rate limit tracked
/// in-memory, results cached in `reputation_cache` across restarts.
/// SPEC_FULL.md §4.11.
pub struct AbuseIpDbReputationClient {
    http_client: reqwest::Client,
    pool: SqlitePool,
    api_key: Option<String>,
    daily_limit: u64,
    calls_today: AtomicU64,
    calls_date: Mutex<String>,
}

impl AbuseIpDbReputationClient {
    pub fn new(http_client: reqwest::Client, pool: SqlitePool, api_key: Option<String>, daily_limit: u64) -> Self {
        Self {
            http_client,
            pool,
            api_key,
            daily_limit,
            calls_today: AtomicU64::new(0),
            calls_date: Mutex::new(String::new()),
        }
    }

    fn is_rate_limited(&self) -> bool {
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let mut calls_date = self.calls_date.lock().unwrap_or_else(|e| e.into_inner());
        if *calls_date != today {
            *calls_date = today;
            self.calls_today.store(0, Ordering::Relaxed);
        }
        self.calls_today.load(Ordering::Relaxed) >= self.daily_limit
    }

    async fn cached(&self, ip: Ipv4Addr) -> Option<ReputationRecord> {
        let row = sqlx::query("SELECT score, raw_confidence, total_reports, checked_at FROM reputation_cache WHERE ip = ?")
            .bind(ip.to_string())
            .fetch_optional(&self.pool)
            .await
            .ok()??;

        let checked_at: String = row.get("checked_at");
        let checked_at = chrono::DateTime::parse_from_rfc3339(&checked_at).ok()?;
        if (chrono::Utc::now() - checked_at.with_timezone(&chrono::Utc)).num_seconds() >= CACHE_TTL_SECS {
            return None;
        }

        Some(ReputationRecord {
            ip,
            score: row.get("score"),
            raw_confidence: row.get::<i64, _>("raw_confidence") as u8,
            total_reports: row.get::<i64, _>("total_reports") as u64,
        })
    }

    async fn store(&self, record: &ReputationRecord) {
        let _ = sqlx::query(
            "INSERT INTO reputation_cache (ip, score, raw_confidence, total_reports, checked_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(ip) DO UPDATE SET
                score = excluded.score, raw_confidence = excluded.raw_confidence,
                total_reports = excluded.total_reports, checked_at = excluded.checked_at",
        )
        .bind(record.ip.to_string())
        .bind(record.score)
        .bind(record.raw_confidence as i64)
        .bind(record.total_reports as i64)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;
    }

    fn normalize_score(abuse_confidence: i64) -> f64 {
        let clamped = abuse_confidence.clamp(0, 100);
        (clamped as f64 / 100.0 * 100.0).round() / 100.0
    }
}

#[async_trait]
impl ReputationClientPort for AbuseIpDbReputationClient {
    async fn check(&self, ip: Ipv4Addr) -> Result<Option<ReputationRecord>, DomainError> {
        let Some(api_key) = &self.api_key else {
            warn!("AbuseIPDB API key not configured");
            return Ok(None);
        };

        if let Some(record) = self.cached(ip).await {
            debug!(%ip, "abuseipdb cache hit");
            return Ok(Some(record));
        }

        if self.is_rate_limited() {
            warn!(%ip, "abuseipdb daily rate limit reached");
            return Ok(None);
        }

        let response = self
            .http_client
            .get(format!("{ABUSEIPDB_BASE_URL}/check"))
            .header("Key", api_key)
            .header("Accept", "application/json")
            .query(&[("ipAddress", ip.to_string()), ("maxAgeInDays", MAX_AGE_DAYS.to_string())])
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("abuseipdb check for {ip}: {e}")))?;

        if !response.status().is_success() {
            error!(%ip, status = %response.status(), "abuseipdb check failed");
            return Ok(None);
        }

        self.calls_today.fetch_add(1, Ordering::Relaxed);

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("parsing abuseipdb response: {e}")))?;
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        let abuse_confidence = data.get("abuseConfidenceScore").and_then(|v| v.as_i64()).unwrap_or(0);
        let total_reports = data.get("totalReports").and_then(|v| v.as_u64()).unwrap_or(0);

        let record = ReputationRecord {
            ip,
            score: Self::normalize_score(abuse_confidence),
            raw_confidence: abuse_confidence.clamp(0, 100) as u8,
            total_reports,
        };

        self.store(&record).await;
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_and_clamps_confidence() {
        assert_eq!(AbuseIpDbReputationClient::normalize_score(42), 0.42);
        assert_eq!(AbuseIpDbReputationClient::normalize_score(150), 1.0);
        assert_eq!(AbuseIpDbReputationClient::normalize_score(-5), 0.0);
    }

    #[tokio::test]
    async fn returns_none_without_api_key() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let client = AbuseIpDbReputationClient::new(reqwest::Client::new(), pool, None, 1000);
        let result = client.check(Ipv4Addr::new(1, 2, 3, 4)).await.unwrap();
        assert!(result.is_none());
    }
}
