use std::sync::Arc;

use guardian_domain::DomainError;

use crate::ports::{FirewallAdapterPort, FirewallRuleStorePort};

pub struct ToggleFirewallRuleUseCase {
    store: Arc<dyn FirewallRuleStorePort>,
    adapter: Arc<dyn FirewallAdapterPort>,
}

impl ToggleFirewallRuleUseCase {
    pub fn new(store: Arc<dyn FirewallRuleStorePort>, adapter: Arc<dyn FirewallAdapterPort>) -> Self {
        Self { store, adapter }
    }

    pub async fn execute(&self, rule_id: i64, is_active: bool) -> Result<(), DomainError> {
        self.store.set_active(rule_id, is_active).await?;
        let active = self.store.list_active().await?;
        self.adapter.apply_rules(&active).await
    }
}
