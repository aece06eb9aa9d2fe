use async_trait::async_trait;
use guardian_application::ports::threat_store_port::{SubnetAggregate, ThreatStorePort};
use guardian_domain::{DomainError, ThreatFeed, ThreatIndicator};
use sqlx::{Row, SqlitePool};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::instrument;

/// Threat Ingestor persistence (C10): feed registry plus the /24 indicator
/// table, merged in place on re-ingestion. SPEC_FULL.md §4.10.
pub struct SqliteThreatStore {
    pool: SqlitePool,
}

impl SqliteThreatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_indicator(row: &sqlx::sqlite::SqliteRow) -> ThreatIndicator {
        let source_feeds: String = row.get("source_feeds");
        let indicator_types: String = row.get("indicator_types");
        let cve_refs: String = row.get("cve_refs");
        ThreatIndicator {
            subnet_hash: Arc::from(row.get::<String, _>("subnet_hash").as_str()),
            subnet_prefix: row.get::<Option<String>, _>("subnet_prefix").map(|s| Arc::from(s.as_str())),
            threat_score: row.get("threat_score"),
            source_feeds: split_set(&source_feeds),
            indicator_types: split_set(&indicator_types),
            cve_refs: cve_refs
                .split(',')
                .filter(|s| !s.is_empty())
                .map(Arc::from)
                .collect(),
            first_seen: row.get("first_seen"),
            last_seen: row.get("last_seen"),
            report_count: row.get::<i64, _>("report_count") as u64,
            expires_at: row.get("expires_at"),
        }
    }
}

fn split_set(raw: &str) -> BTreeSet<Arc<str>> {
    raw.split(',').filter(|s| !s.is_empty()).map(Arc::from).collect()
}

fn join_set<'a>(set: impl IntoIterator<Item = &'a Arc<str>>) -> String {
    set.into_iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(",")
}

#[async_trait]
impl ThreatStorePort for SqliteThreatStore {
    async fn ensure_feed_registered(&self, name: &str, feed_url: &str, feed_type: &str) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO threat_feeds (name, feed_url, feed_type) VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET feed_url = excluded.feed_url, feed_type = excluded.feed_type",
        )
        .bind(name)
        .bind(feed_url)
        .bind(feed_type)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn list_feeds(&self) -> Result<Vec<ThreatFeed>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, feed_url, feed_type, enabled, last_synced_at, entries_count FROM threat_feeds",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| ThreatFeed {
                id: row.get("id"),
                name: Arc::from(row.get::<String, _>("name").as_str()),
                feed_url: Arc::from(row.get::<String, _>("feed_url").as_str()),
                feed_type: Arc::from(row.get::<String, _>("feed_type").as_str()),
                enabled: row.get::<i64, _>("enabled") != 0,
                last_synced_at: row.get("last_synced_at"),
                entries_count: row.get::<i64, _>("entries_count") as u64,
            })
            .collect())
    }

    async fn mark_feed_synced(&self, name: &str, entries_count: u64) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE threat_feeds SET last_synced_at = ?, entries_count = ? WHERE name = ?",
        )
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(entries_count as i64)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, aggregate))]
    async fn upsert_indicator(
        &self,
        subnet_hash: &str,
        subnet_prefix: Option<&str>,
        aggregate: &SubnetAggregate,
        score: f64,
        expires_at: &str,
    ) -> Result<ThreatIndicator, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let existing = sqlx::query(
            "SELECT subnet_hash, subnet_prefix, threat_score, source_feeds, indicator_types, cve_refs,
                    first_seen, last_seen, report_count, expires_at
             FROM threat_indicators WHERE subnet_hash = ?",
        )
        .bind(subnet_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        let indicator = match existing {
            Some(row) => {
                let mut current = Self::row_to_indicator(&row);
                current.source_feeds.extend(aggregate.feeds.iter().cloned());
                current.indicator_types.extend(aggregate.types.iter().cloned());
                current.threat_score = score;
                current.last_seen = now.clone();
                current.report_count += 1;
                current.expires_at = expires_at.to_string();
                if current.subnet_prefix.is_none() {
                    current.subnet_prefix = subnet_prefix.map(Arc::from);
                }
                current
            }
            None => ThreatIndicator {
                subnet_hash: Arc::from(subnet_hash),
                subnet_prefix: subnet_prefix.map(Arc::from),
                threat_score: score,
                source_feeds: aggregate.feeds.clone(),
                indicator_types: aggregate.types.clone(),
                cve_refs: Vec::new(),
                first_seen: now.clone(),
                last_seen: now.clone(),
                report_count: 1,
                expires_at: expires_at.to_string(),
            },
        };

        sqlx::query(
            "INSERT INTO threat_indicators
                (subnet_hash, subnet_prefix, threat_score, source_feeds, indicator_types, cve_refs,
                 first_seen, last_seen, report_count, expires_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(subnet_hash) DO UPDATE SET
                subnet_prefix = excluded.subnet_prefix,
                threat_score = excluded.threat_score,
                source_feeds = excluded.source_feeds,
                indicator_types = excluded.indicator_types,
                cve_refs = excluded.cve_refs,
                last_seen = excluded.last_seen,
                report_count = excluded.report_count,
                expires_at = excluded.expires_at",
        )
        .bind(indicator.subnet_hash.as_ref())
        .bind(indicator.subnet_prefix.as_deref())
        .bind(indicator.threat_score)
        .bind(join_set(indicator.source_feeds.iter()))
        .bind(join_set(indicator.indicator_types.iter()))
        .bind(indicator.cve_refs.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(","))
        .bind(&indicator.first_seen)
        .bind(&indicator.last_seen)
        .bind(indicator.report_count as i64)
        .bind(&indicator.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(indicator)
    }

    async fn get_indicator(&self, subnet_hash: &str) -> Result<Option<ThreatIndicator>, DomainError> {
        let row = sqlx::query(
            "SELECT subnet_hash, subnet_prefix, threat_score, source_feeds, indicator_types, cve_refs,
                    first_seen, last_seen, report_count, expires_at
             FROM threat_indicators WHERE subnet_hash = ?",
        )
        .bind(subnet_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(row.map(|r| Self::row_to_indicator(&r)))
    }

    async fn delete_expired(&self, now: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM threat_indicators WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(result.rows_affected())
    }

    async fn active_indicators(&self, now: &str) -> Result<Vec<ThreatIndicator>, DomainError> {
        let rows = sqlx::query(
            "SELECT subnet_hash, subnet_prefix, threat_score, source_feeds, indicator_types, cve_refs,
                    first_seen, last_seen, report_count, expires_at
             FROM threat_indicators WHERE expires_at >= ?",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_indicator).collect())
    }

    async fn high_score_subnets(
        &self,
        threshold: f64,
        now: &str,
    ) -> Result<HashMap<Arc<str>, ThreatIndicator>, DomainError> {
        let rows = sqlx::query(
            "SELECT subnet_hash, subnet_prefix, threat_score, source_feeds, indicator_types, cve_refs,
                    first_seen, last_seen, report_count, expires_at
             FROM threat_indicators WHERE expires_at >= ? AND threat_score >= ?",
        )
        .bind(now)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(rows
            .iter()
            .map(Self::row_to_indicator)
            .map(|ind| (ind.subnet_hash.clone(), ind))
            .collect())
    }
}
