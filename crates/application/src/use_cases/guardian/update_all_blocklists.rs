use std::sync::Arc;

use guardian_domain::DomainError;
use tracing::{info, warn};

use crate::ports::BlocklistStorePort;

/// Drives a sync pass across every registered blocklist source. One
/// source's failure does not abort the others.
pub struct UpdateAllBlocklistsUseCase {
    blocklist: Arc<dyn BlocklistStorePort>,
}

impl UpdateAllBlocklistsUseCase {
    pub fn new(blocklist: Arc<dyn BlocklistStorePort>) -> Self {
        Self { blocklist }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let sources = self.blocklist.list_sources().await?;
        let mut total = 0u64;

        for source in sources {
            match self.blocklist.sync_source(&source).await {
                Ok(count) => {
                    info!(source = %source.name, entries = count, "blocklist source synced");
                    total += count;
                }
                Err(err) => {
                    warn!(source = %source.name, error = %err, "blocklist source sync failed");
                }
            }
        }

        Ok(total)
    }
}
