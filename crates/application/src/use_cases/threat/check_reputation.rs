use std::net::Ipv4Addr;
use std::sync::Arc;

use guardian_domain::{DomainError, ReputationRecord};

use crate::ports::ReputationClientPort;

/// Reputation Client `check(ip)` (C11), SPEC_FULL.md §4.11.
pub struct CheckReputationUseCase {
    client: Arc<dyn ReputationClientPort>,
}

impl CheckReputationUseCase {
    pub fn new(client: Arc<dyn ReputationClientPort>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, ip: Ipv4Addr) -> Result<Option<ReputationRecord>, DomainError> {
        self.client.check(ip).await
    }
}
