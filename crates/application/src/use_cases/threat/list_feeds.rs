use std::sync::Arc;

use guardian_domain::{DomainError, ThreatFeed};

use crate::ports::threat_store_port::ThreatStorePort;

pub struct ListThreatFeedsUseCase {
    store: Arc<dyn ThreatStorePort>,
}

impl ListThreatFeedsUseCase {
    pub fn new(store: Arc<dyn ThreatStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<ThreatFeed>, DomainError> {
        self.store.list_feeds().await
    }
}
