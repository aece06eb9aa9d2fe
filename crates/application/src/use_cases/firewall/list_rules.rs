use std::sync::Arc;

use guardian_domain::{DomainError, FirewallRule};

use crate::ports::FirewallRuleStorePort;

pub struct ListFirewallRulesUseCase {
    store: Arc<dyn FirewallRuleStorePort>,
}

impl ListFirewallRulesUseCase {
    pub fn new(store: Arc<dyn FirewallRuleStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<FirewallRule>, DomainError> {
        self.store.list_active().await
    }
}
