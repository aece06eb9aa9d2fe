use async_trait::async_trait;
use guardian_domain::{DomainError, FirewallEvent, FirewallRule, FirewallRuleType};

/// Application-facing port for the Firewall Service's persistence side
/// (C12): CRUD on rules plus the audit event log. SPEC_FULL.md §3, §4.12.
#[async_trait]
pub trait FirewallRuleStorePort: Send + Sync {
    async fn insert(&self, rule: FirewallRule) -> Result<i64, DomainError>;

    async fn remove(&self, rule_id: i64) -> Result<(), DomainError>;

    async fn set_active(&self, rule_id: i64, is_active: bool) -> Result<(), DomainError>;

    async fn list_active(&self) -> Result<Vec<FirewallRule>, DomainError>;

    async fn exists(&self, rule_type: FirewallRuleType, target: &str) -> Result<bool, DomainError>;

    async fn increment_hit(&self, rule_id: i64) -> Result<(), DomainError>;

    async fn record_event(&self, event: FirewallEvent) -> Result<(), DomainError>;

    async fn list_events(&self, limit: u32) -> Result<Vec<FirewallEvent>, DomainError>;
}
