use std::sync::Arc;

use guardian_domain::{BlocklistSource, DomainError};

use crate::ports::BlocklistStorePort;

pub struct UpdateBlocklistSourceUseCase {
    blocklist: Arc<dyn BlocklistStorePort>,
}

impl UpdateBlocklistSourceUseCase {
    pub fn new(blocklist: Arc<dyn BlocklistStorePort>) -> Self {
        Self { blocklist }
    }

    pub async fn execute(&self, source: &BlocklistSource) -> Result<u64, DomainError> {
        self.blocklist.sync_source(source).await
    }
}
