use async_trait::async_trait;
use guardian_domain::{CustomRule, DomainError, RuleAction, RuleMatch};

/// Application-facing port for the Rules Store (C4): memory index backed by
/// persistence. SPEC_FULL.md §4.4.
#[async_trait]
pub trait RulesStorePort: Send + Sync {
    async fn add(
        &self,
        action: RuleAction,
        domain: &str,
        category: &str,
        reason: &str,
    ) -> Result<i64, DomainError>;

    /// Soft-deletes the rule: clears the active flag and removes it from the
    /// index iff the indexed identity still matches (prevents racing with a
    /// concurrent add for the same domain).
    async fn remove(&self, rule_id: i64) -> Result<(), DomainError>;

    /// Exact-match only; rules have no parent-domain fallback.
    fn check(&self, domain: &str) -> Option<RuleMatch>;

    async fn increment_hit(&self, rule_id: i64);

    async fn list(&self) -> Result<Vec<CustomRule>, DomainError>;
}
