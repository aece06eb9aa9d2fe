use std::sync::Arc;

use guardian_domain::DomainError;

use crate::ports::{FirewallAdapterPort, FirewallRuleStorePort};

pub struct RemoveFirewallRuleUseCase {
    store: Arc<dyn FirewallRuleStorePort>,
    adapter: Arc<dyn FirewallAdapterPort>,
}

impl RemoveFirewallRuleUseCase {
    pub fn new(store: Arc<dyn FirewallRuleStorePort>, adapter: Arc<dyn FirewallAdapterPort>) -> Self {
        Self { store, adapter }
    }

    pub async fn execute(&self, rule_id: i64) -> Result<(), DomainError> {
        self.store.remove(rule_id).await?;
        let active = self.store.list_active().await?;
        self.adapter.apply_rules(&active).await
    }
}
