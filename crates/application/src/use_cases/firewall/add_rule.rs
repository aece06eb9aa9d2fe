use std::sync::Arc;

use guardian_domain::{DomainError, FirewallRule};

use crate::ports::{FirewallAdapterPort, FirewallRuleStorePort};

/// Firewall Service `CRUD` (C12): insert then re-sync the active adapter,
/// per SPEC_FULL.md §4.12 "After any rule-set mutation, invoke
/// adapter.apply_rules".
pub struct AddFirewallRuleUseCase {
    store: Arc<dyn FirewallRuleStorePort>,
    adapter: Arc<dyn FirewallAdapterPort>,
}

impl AddFirewallRuleUseCase {
    pub fn new(store: Arc<dyn FirewallRuleStorePort>, adapter: Arc<dyn FirewallAdapterPort>) -> Self {
        Self { store, adapter }
    }

    pub async fn execute(&self, rule: FirewallRule) -> Result<i64, DomainError> {
        let id = self.store.insert(rule).await?;
        let active = self.store.list_active().await?;
        self.adapter.apply_rules(&active).await?;
        Ok(id)
    }
}
