use std::sync::Arc;

use guardian_domain::{BlocklistSource, DomainError};

use crate::ports::BlocklistStorePort;

/// Lists persisted sources plus the live merged-index count, resolving the
/// `domain_count` open question: the persisted per-source count stays
/// authoritative for storage, this use case additionally reports
/// `union_indexed_count` computed from the live index (SPEC_FULL.md §9).
pub struct GetBlocklistSourcesUseCase {
    blocklist: Arc<dyn BlocklistStorePort>,
}

#[derive(Debug, Clone)]
pub struct BlocklistSourcesReport {
    pub sources: Vec<BlocklistSource>,
    pub union_indexed_count: u64,
}

impl GetBlocklistSourcesUseCase {
    pub fn new(blocklist: Arc<dyn BlocklistStorePort>) -> Self {
        Self { blocklist }
    }

    pub async fn execute(&self) -> Result<BlocklistSourcesReport, DomainError> {
        let sources = self.blocklist.list_sources().await?;
        let union_indexed_count = self.blocklist.union_indexed_count();
        Ok(BlocklistSourcesReport { sources, union_indexed_count })
    }
}
