use async_trait::async_trait;
use guardian_application::ports::CachePort;
use guardian_domain::CacheStats;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// Cache (C1): a bounded key→entry map with LRU eviction and TTL expiry,
/// per SPEC_FULL.md §4.1. One mutex serialises every operation; it is held
/// only across the map access itself, never across I/O — there is none here,
/// the upstream query that fills a miss happens entirely outside this type.
pub struct DnsCache {
    entries: Mutex<LruCache<String, Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl DnsCache {
    pub fn new(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl CachePort for DnsCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().await;
        let hit = match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        };
        drop(entries);

        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    async fn set(&self, key: String, value: Vec<u8>, ttl_secs: u32) {
        let expires_at = Instant::now() + Duration::from_secs(ttl_secs as u64);
        let mut entries = self.entries.lock().await;
        if entries.len() == entries.cap().get() && !entries.contains(&key) {
            if entries.pop_lru().is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        entries.put(key, Entry { value, expires_at });
    }

    async fn stats(&self) -> CacheStats {
        let size = self.entries.lock().await.len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = DnsCache::new(4);
        assert!(cache.get("a").await.is_none());
        cache.set("a".into(), vec![1, 2, 3], 60).await;
        assert_eq!(cache.get("a").await, Some(vec![1, 2, 3]));
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn zero_ttl_is_immediate_miss() {
        let cache = DnsCache::new(4);
        cache.set("a".into(), vec![1], 0).await;
        assert!(cache.get("a").await.is_none());
    }

    #[tokio::test]
    async fn evicts_lru_when_full() {
        let cache = DnsCache::new(2);
        cache.set("a".into(), vec![1], 60).await;
        cache.set("b".into(), vec![2], 60).await;
        cache.set("c".into(), vec![3], 60).await;

        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_some());
        assert!(cache.get("c").await.is_some());
        assert_eq!(cache.stats().await.evictions, 1);
    }
}
