use async_trait::async_trait;
use dashmap::DashMap;
use guardian_application::ports::RulesStorePort;
use guardian_domain::validators::normalize_domain;
use guardian_domain::{CustomRule, DomainError, RuleAction, RuleMatch};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::instrument;

/// Rules Store (C4): a memory index FQDN → (action, rule_id, category)
/// backed by persistence. SPEC_FULL.md §4.4.
pub struct SqliteRulesStore {
    pool: SqlitePool,
    index: DashMap<Arc<str>, RuleMatch>,
}

impl SqliteRulesStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, DomainError> {
        let store = Self {
            pool,
            index: DashMap::new(),
        };
        store.reload_index().await?;
        Ok(store)
    }

    async fn reload_index(&self) -> Result<(), DomainError> {
        let rows = sqlx::query(
            "SELECT id, action, domain, category FROM custom_rules WHERE is_active = 1",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        self.index.clear();
        for row in &rows {
            let action_str: String = row.get("action");
            let action: RuleAction = action_str.parse()?;
            let domain: String = row.get("domain");
            let category: String = row.get("category");
            self.index.insert(
                Arc::from(domain.as_str()),
                RuleMatch {
                    action,
                    rule_id: row.get("id"),
                    category: Arc::from(category.as_str()),
                },
            );
        }
        Ok(())
    }
}

#[async_trait]
impl RulesStorePort for SqliteRulesStore {
    #[instrument(skip(self))]
    async fn add(&self, action: RuleAction, domain: &str, category: &str, reason: &str) -> Result<i64, DomainError> {
        let normalized = normalize_domain(domain);
        let created_at = chrono::Utc::now().to_rfc3339();

        let id = sqlx::query(
            "INSERT INTO custom_rules (action, domain, category, reason, is_active, created_at) VALUES (?, ?, ?, ?, 1, ?)",
        )
        .bind(action.as_str())
        .bind(&normalized)
        .bind(category)
        .bind(reason)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?
        .last_insert_rowid();

        self.index.insert(
            Arc::from(normalized.as_str()),
            RuleMatch {
                action,
                rule_id: id,
                category: Arc::from(category),
            },
        );

        Ok(id)
    }

    async fn remove(&self, rule_id: i64) -> Result<(), DomainError> {
        let row = sqlx::query("SELECT domain FROM custom_rules WHERE id = ?")
            .bind(rule_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        sqlx::query("UPDATE custom_rules SET is_active = 0 WHERE id = ?")
            .bind(rule_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        if let Some(row) = row {
            let domain: String = row.get("domain");
            // Only drop the indexed entry if it still points at this rule —
            // a concurrent `add` for the same domain must not be undone.
            if let Some(entry) = self.index.get(domain.as_str()) {
                if entry.rule_id == rule_id {
                    drop(entry);
                    self.index.remove(domain.as_str());
                }
            }
        }

        Ok(())
    }

    fn check(&self, domain: &str) -> Option<RuleMatch> {
        let normalized = normalize_domain(domain);
        self.index.get(normalized.as_str()).map(|entry| entry.clone())
    }

    async fn increment_hit(&self, rule_id: i64) {
        let _ = sqlx::query("UPDATE custom_rules SET hit_count = hit_count + 1 WHERE id = ?")
            .bind(rule_id)
            .execute(&self.pool)
            .await;
    }

    async fn list(&self) -> Result<Vec<CustomRule>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, action, domain, category, reason, hit_count, is_active, created_at FROM custom_rules ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let action_str: String = row.get("action");
                Ok(CustomRule {
                    id: row.get("id"),
                    action: action_str.parse()?,
                    domain: Arc::from(row.get::<String, _>("domain").as_str()),
                    category: Arc::from(row.get::<String, _>("category").as_str()),
                    reason: Arc::from(row.get::<String, _>("reason").as_str()),
                    hit_count: row.get::<i64, _>("hit_count") as u64,
                    is_active: row.get::<i64, _>("is_active") != 0,
                    created_at: row.get("created_at"),
                })
            })
            .collect()
    }
}
