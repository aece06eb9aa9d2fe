use async_trait::async_trait;
use guardian_application::ports::AlertStorePort;
use guardian_domain::{Alert, AlertDetail, DomainError};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::instrument;

/// Alert Pipeline persistence (C14): append-only `alerts` table, SPEC_FULL.md
/// §6. No read side is exposed yet; nothing in scope queries alert history
/// back out.
pub struct SqliteAlertStore {
    pool: SqlitePool,
}

impl SqliteAlertStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn detail_json(detail: &AlertDetail) -> serde_json::Value {
        match detail {
            AlertDetail::FieldChange { field, old_value, new_value } => {
                json!({ "field": field.as_ref(), "old_value": old_value.as_ref(), "new_value": new_value.as_ref() })
            }
            AlertDetail::Count(n) => json!({ "count": n }),
            AlertDetail::KeyValue(map) => json!(map),
        }
    }
}

#[async_trait]
impl AlertStorePort for SqliteAlertStore {
    #[instrument(skip(self, alert))]
    async fn record(&self, alert: &Alert) -> Result<(), DomainError> {
        let details = Self::detail_json(&alert.details).to_string();
        sqlx::query(
            "INSERT INTO alerts (severity, alert_type, ip, mac, message, details, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(alert.severity.as_str())
        .bind(alert.alert_type.as_str())
        .bind(alert.ip.as_ref())
        .bind(alert.mac.as_deref())
        .bind(&alert.message)
        .bind(details)
        .bind(&alert.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_domain::AlertSeverity;
    use std::sync::Arc;

    async fn migrated_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                severity TEXT NOT NULL,
                alert_type TEXT NOT NULL,
                ip TEXT NOT NULL,
                mac TEXT,
                message TEXT NOT NULL,
                details TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[tokio::test]
    async fn records_an_alert() {
        let pool = migrated_pool().await;
        let store = SqliteAlertStore::new(pool.clone());
        let alert = Alert {
            severity: AlertSeverity::Warning,
            alert_type: guardian_domain::AlertType::PortChange,
            ip: Arc::from("10.0.0.5"),
            mac: None,
            message: "new port opened".into(),
            details: AlertDetail::Count(1),
            timestamp: "2026-01-01T00:00:00Z".into(),
        };
        store.record(&alert).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alerts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
