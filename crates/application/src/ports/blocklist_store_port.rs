use async_trait::async_trait;
use guardian_domain::{BlocklistSource, DomainError};

/// Application-facing port for the Blocklist Store (C3): download, parse,
/// persist, index, and serve domain+parent lookups. SPEC_FULL.md §4.3.
#[async_trait]
pub trait BlocklistStorePort: Send + Sync {
    /// Fetch and parse `source`'s wire content, then atomically replace the
    /// persisted set belonging to it (delete-then-insert per source).
    /// Returns the number of entries parsed after filtering.
    async fn sync_source(&self, source: &BlocklistSource) -> Result<u64, DomainError>;

    async fn list_sources(&self) -> Result<Vec<BlocklistSource>, DomainError>;

    async fn add_source(&self, source: BlocklistSource) -> Result<i64, DomainError>;

    async fn remove_source(&self, source_id: i64) -> Result<(), DomainError>;

    /// Normalise `fqdn`, then walk exact match → parent labels until a match
    /// is found or no labels remain (SPEC_FULL.md §4.3 `is_blocked`).
    fn is_blocked(&self, fqdn: &str) -> Option<String>;

    /// Live count of distinct domains across the merged in-memory index,
    /// independent of any single source's persisted `domain_count`.
    fn union_indexed_count(&self) -> u64;
}
