use async_trait::async_trait;
use guardian_domain::CacheStats;

/// Application-facing port for the Cache (C1). The concrete implementation
/// (infrastructure) owns a TTL-aware LRU map behind a single mutex, per
/// SPEC_FULL.md §4.1 — lock held only across map access, never across I/O.
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Returns the cached wire-format answer for `key`, or `None` on a miss
    /// or expiry. A TTL of zero is valid and always yields a miss.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    async fn set(&self, key: String, value: Vec<u8>, ttl_secs: u32);

    async fn stats(&self) -> CacheStats;
}
