use async_trait::async_trait;
use guardian_application::ports::FirewallRuleStorePort;
use guardian_domain::{DomainError, FirewallEvent, FirewallRule, FirewallRuleType};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::instrument;

/// Firewall Control Plane persistence (C12): CRUD on rules plus the audit
/// event log. SPEC_FULL.md §4.12. No in-memory index — every lookup the
/// port exposes is already async and infrequent compared to DNS-path calls.
pub struct SqliteFirewallRuleStore {
    pool: SqlitePool,
}

impl SqliteFirewallRuleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_rule(row: &sqlx::sqlite::SqliteRow) -> Result<FirewallRule, DomainError> {
        let rule_type: String = row.get("rule_type");
        let direction: String = row.get("direction");
        let protocol: String = row.get("protocol");
        let source: String = row.get("source");
        Ok(FirewallRule {
            id: row.get("id"),
            rule_type: rule_type.parse()?,
            target: Arc::from(row.get::<String, _>("target").as_str()),
            direction: direction.parse()?,
            protocol: protocol.parse()?,
            source: source.parse()?,
            reason: Arc::from(row.get::<String, _>("reason").as_str()),
            is_active: row.get::<i64, _>("is_active") != 0,
            created_at: row.get("created_at"),
            expires_at: row.get("expires_at"),
            hit_count: row.get::<i64, _>("hit_count") as u64,
        })
    }
}

#[async_trait]
impl FirewallRuleStorePort for SqliteFirewallRuleStore {
    #[instrument(skip(self, rule))]
    async fn insert(&self, rule: FirewallRule) -> Result<i64, DomainError> {
        let id = sqlx::query(
            "INSERT INTO firewall_rules (rule_type, target, direction, protocol, source, reason, is_active, created_at, expires_at, hit_count)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0)",
        )
        .bind(rule.rule_type.as_str())
        .bind(rule.target.as_ref())
        .bind(rule.direction.as_str())
        .bind(rule.protocol.as_str())
        .bind(rule.source.as_str())
        .bind(rule.reason.as_ref())
        .bind(rule.is_active as i64)
        .bind(&rule.created_at)
        .bind(&rule.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?
        .last_insert_rowid();

        Ok(id)
    }

    async fn remove(&self, rule_id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM firewall_rules WHERE id = ?")
            .bind(rule_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn set_active(&self, rule_id: i64, is_active: bool) -> Result<(), DomainError> {
        sqlx::query("UPDATE firewall_rules SET is_active = ? WHERE id = ?")
            .bind(is_active as i64)
            .bind(rule_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<FirewallRule>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, rule_type, target, direction, protocol, source, reason, is_active, created_at, expires_at, hit_count
             FROM firewall_rules WHERE is_active = 1 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        rows.iter().map(Self::row_to_rule).collect()
    }

    async fn exists(&self, rule_type: FirewallRuleType, target: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT 1 FROM firewall_rules WHERE rule_type = ? AND target = ? AND is_active = 1",
        )
        .bind(rule_type.as_str())
        .bind(target)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn increment_hit(&self, rule_id: i64) -> Result<(), DomainError> {
        sqlx::query("UPDATE firewall_rules SET hit_count = hit_count + 1 WHERE id = ?")
            .bind(rule_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn record_event(&self, event: FirewallEvent) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO firewall_events (rule_id, event_type, detail, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(event.rule_id)
        .bind(event.event_type.as_ref())
        .bind(event.detail.as_ref())
        .bind(&event.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn list_events(&self, limit: u32) -> Result<Vec<FirewallEvent>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, rule_id, event_type, detail, created_at FROM firewall_events ORDER BY id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                Ok(FirewallEvent {
                    id: row.get("id"),
                    rule_id: row.get("rule_id"),
                    event_type: Arc::from(row.get::<String, _>("event_type").as_str()),
                    detail: Arc::from(row.get::<String, _>("detail").as_str()),
                    created_at: row.get("created_at"),
                })
            })
            .collect()
    }
}
