use std::sync::Arc;

use guardian_domain::DomainError;

use crate::ports::FirewallAdapterPort;

pub struct InstallFirewallAdapterUseCase {
    adapter: Arc<dyn FirewallAdapterPort>,
}

impl InstallFirewallAdapterUseCase {
    pub fn new(adapter: Arc<dyn FirewallAdapterPort>) -> Self {
        Self { adapter }
    }

    pub async fn execute(&self) -> Result<(), DomainError> {
        self.adapter.install().await
    }
}
