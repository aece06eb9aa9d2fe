use std::sync::Arc;

use guardian_domain::CacheStats;

use crate::ports::CachePort;

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn CachePort>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn CachePort>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> CacheStats {
        self.cache.stats().await
    }
}
