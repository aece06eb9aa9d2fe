use async_trait::async_trait;
use dashmap::DashMap;
use guardian_application::ports::BlocklistStorePort;
use guardian_domain::validators::{is_never_block, normalize_domain, strip_leftmost_label, HOSTS_SINK_ADDRESSES};
use guardian_domain::blocklist::derive_category_owned;
use guardian_domain::{BlocklistFormat, BlocklistSource, DomainError};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Blocklist Store (C3): downloads and parses sources, persists them with a
/// delete-then-insert replace per source, and serves lookups from a merged
/// in-memory index kept alongside the database. SPEC_FULL.md §4.3.
pub struct SqliteBlocklistStore {
    pool: SqlitePool,
    http_client: reqwest::Client,
    index: DashMap<Arc<str>, Arc<str>>,
}

impl SqliteBlocklistStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            http_client: reqwest::Client::builder()
                .user_agent("guardian-core/0.1")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            index: DashMap::new(),
        }
    }

    /// Rebuild the merged in-memory index from persisted rows. Called once
    /// at startup and after every `sync_source`.
    pub async fn reload_index(&self) -> Result<(), DomainError> {
        let rows = sqlx::query("SELECT domain, category FROM blocked_domains")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        self.index.clear();
        for row in &rows {
            let domain: String = row.get("domain");
            let category: String = row.get("category");
            self.index.insert(Arc::from(domain.as_str()), Arc::from(category.as_str()));
        }
        info!(count = self.index.len(), "blocklist index reloaded");
        Ok(())
    }

    fn parse(format: BlocklistFormat, body: &str) -> Vec<String> {
        body.lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    return None;
                }
                let domain = match format {
                    BlocklistFormat::Hosts => {
                        let mut fields = line.split_whitespace();
                        let sink = fields.next()?;
                        if !HOSTS_SINK_ADDRESSES.contains(&sink) {
                            return None;
                        }
                        fields.next()?
                    }
                    BlocklistFormat::Domains => line,
                };
                let normalized = normalize_domain(domain);
                if normalized.is_empty() || is_never_block(&normalized) {
                    None
                } else {
                    Some(normalized)
                }
            })
            .collect()
    }
}

#[async_trait]
impl BlocklistStorePort for SqliteBlocklistStore {
    #[instrument(skip(self, source))]
    async fn sync_source(&self, source: &BlocklistSource) -> Result<u64, DomainError> {
        let response = self
            .http_client
            .get(source.url.as_ref())
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("fetching {}: {}", source.url, e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("reading {}: {}", source.url, e)))?;

        let domains = Self::parse(source.format, &body);

        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Persistence(e.to_string()))?;

        sqlx::query("DELETE FROM blocked_domains WHERE source_id = ?")
            .bind(source.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        for domain in &domains {
            let category = derive_category_owned(&source.name, domain, &source.category);
            sqlx::query("INSERT OR IGNORE INTO blocked_domains (source_id, domain, category) VALUES (?, ?, ?)")
                .bind(source.id)
                .bind(domain)
                .bind(category)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::Persistence(e.to_string()))?;
        }

        sqlx::query("UPDATE blocklist_sources SET domain_count = ?, last_updated = ? WHERE id = ?")
            .bind(domains.len() as i64)
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(source.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        tx.commit().await.map_err(|e| DomainError::Persistence(e.to_string()))?;

        self.reload_index().await?;
        debug!(source = %source.name, count = domains.len(), "blocklist source synced");
        Ok(domains.len() as u64)
    }

    async fn list_sources(&self) -> Result<Vec<BlocklistSource>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, url, format, category, enabled, domain_count, last_updated, etag FROM blocklist_sources",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let format_str: String = row.get("format");
                Ok(BlocklistSource {
                    id: row.get("id"),
                    name: Arc::from(row.get::<String, _>("name").as_str()),
                    url: Arc::from(row.get::<String, _>("url").as_str()),
                    format: format_str
                        .parse()
                        .map_err(|e: String| DomainError::Persistence(e))?,
                    category: Arc::from(row.get::<String, _>("category").as_str()),
                    domain_count: row.get::<i64, _>("domain_count") as u64,
                    is_enabled: row.get::<i64, _>("enabled") != 0,
                    last_updated: row.get("last_updated"),
                    etag: row.get("etag"),
                })
            })
            .collect()
    }

    async fn add_source(&self, source: BlocklistSource) -> Result<i64, DomainError> {
        let id = sqlx::query(
            "INSERT INTO blocklist_sources (name, url, format, category, enabled) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(source.name.as_ref())
        .bind(source.url.as_ref())
        .bind(source.format.as_str())
        .bind(source.category.as_ref())
        .bind(source.is_enabled as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?
        .last_insert_rowid();

        Ok(id)
    }

    async fn remove_source(&self, source_id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM blocklist_sources WHERE id = ?")
            .bind(source_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        self.reload_index().await
    }

    fn is_blocked(&self, fqdn: &str) -> Option<String> {
        let normalized = normalize_domain(fqdn);
        let mut candidate: &str = &normalized;
        loop {
            if let Some(category) = self.index.get(candidate) {
                return Some(category.to_string());
            }
            match strip_leftmost_label(candidate) {
                Some(rest) => candidate = rest,
                None => return None,
            }
        }
    }

    fn union_indexed_count(&self) -> u64 {
        self.index.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hosts_format() {
        let body = "# comment\n0.0.0.0 ads.example.com\n127.0.0.1 tracker.example.com\nnotasink.com evil.com\n";
        let domains = SqliteBlocklistStore::parse(BlocklistFormat::Hosts, body);
        assert_eq!(domains, vec!["ads.example.com", "tracker.example.com"]);
    }

    #[test]
    fn parses_domains_format_and_skips_never_block() {
        let body = "EVIL.COM.\nlocalhost\n! banner\nbad.net\n";
        let domains = SqliteBlocklistStore::parse(BlocklistFormat::Domains, body);
        assert_eq!(domains, vec!["evil.com", "bad.net"]);
    }
}
