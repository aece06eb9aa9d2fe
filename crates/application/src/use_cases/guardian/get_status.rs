use std::sync::Arc;

use guardian_domain::{CacheStats, DomainError};

use crate::ports::{BlocklistStorePort, CachePort, RulesStorePort};

#[derive(Debug, Clone)]
pub struct GuardianStatus {
    pub cache: CacheStats,
    pub active_rules: u64,
    pub blocked_domains_indexed: u64,
}

/// Backs `GET /api/guardian/status`: a live snapshot across C1/C3/C4,
/// distinct from `/health` which additionally probes upstream reachability.
pub struct GetGuardianStatusUseCase {
    cache: Arc<dyn CachePort>,
    rules: Arc<dyn RulesStorePort>,
    blocklist: Arc<dyn BlocklistStorePort>,
}

impl GetGuardianStatusUseCase {
    pub fn new(
        cache: Arc<dyn CachePort>,
        rules: Arc<dyn RulesStorePort>,
        blocklist: Arc<dyn BlocklistStorePort>,
    ) -> Self {
        Self { cache, rules, blocklist }
    }

    pub async fn execute(&self) -> Result<GuardianStatus, DomainError> {
        let cache = self.cache.stats().await;
        let active_rules = self.rules.list().await?.len() as u64;
        let blocked_domains_indexed = self.blocklist.union_indexed_count();
        Ok(GuardianStatus { cache, active_rules, blocked_domains_indexed })
    }
}
