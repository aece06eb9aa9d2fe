use std::sync::Arc;

use guardian_domain::DomainError;

use crate::ports::{FirewallAdapterPort, FirewallRuleStorePort, PlatformStatus};

/// Backs `GET /api/firewall/status` (C13): adapter metadata merged with the
/// live active-rule count from the store.
pub struct GetFirewallStatusUseCase {
    rule_store: Arc<dyn FirewallRuleStorePort>,
    adapter: Arc<dyn FirewallAdapterPort>,
}

impl GetFirewallStatusUseCase {
    pub fn new(rule_store: Arc<dyn FirewallRuleStorePort>, adapter: Arc<dyn FirewallAdapterPort>) -> Self {
        Self { rule_store, adapter }
    }

    pub async fn execute(&self) -> Result<PlatformStatus, DomainError> {
        let mut status = self.adapter.status().await?;
        let active = self.rule_store.list_active().await?;
        status.active_rule_count = active.len() as u32;
        Ok(status)
    }
}
