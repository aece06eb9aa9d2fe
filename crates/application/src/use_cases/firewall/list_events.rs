use std::sync::Arc;

use guardian_domain::{DomainError, FirewallEvent};

use crate::ports::FirewallRuleStorePort;

pub struct ListFirewallEventsUseCase {
    store: Arc<dyn FirewallRuleStorePort>,
}

impl ListFirewallEventsUseCase {
    pub fn new(store: Arc<dyn FirewallRuleStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, limit: u32) -> Result<Vec<FirewallEvent>, DomainError> {
        self.store.list_events(limit).await
    }
}
