use std::sync::Arc;

use guardian_domain::{CacheStats, DnsQuery, RecordType};

use crate::ports::{BlocklistStorePort, CachePort, UpstreamResolverPort};

const HEALTH_CHECK_DOMAIN: &str = "example.com";

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub upstream_reachable: bool,
    pub blocklist_loaded: bool,
    pub cache: CacheStats,
}

/// Guardian Daemon (C8) health checker, SPEC_FULL.md §4.8: resolves a known
/// domain through the upstream resolver, confirms the blocklist has
/// non-zero entries, and reports cache stats.
pub struct CheckHealthUseCase {
    resolver: Arc<dyn UpstreamResolverPort>,
    blocklist: Arc<dyn BlocklistStorePort>,
    cache: Arc<dyn CachePort>,
}

impl CheckHealthUseCase {
    pub fn new(
        resolver: Arc<dyn UpstreamResolverPort>,
        blocklist: Arc<dyn BlocklistStorePort>,
        cache: Arc<dyn CachePort>,
    ) -> Self {
        Self { resolver, blocklist, cache }
    }

    pub async fn execute(&self) -> HealthReport {
        let query = DnsQuery::new(HEALTH_CHECK_DOMAIN, RecordType::A);
        let upstream_reachable = self.resolver.resolve(&query).await.is_ok();
        let blocklist_loaded = self.blocklist.union_indexed_count() > 0;
        let cache = self.cache.stats().await;

        HealthReport { upstream_reachable, blocklist_loaded, cache }
    }
}
