#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use guardian_application::ports::{BlocklistStorePort, CachePort, DnsAnswer, RulesStorePort, StatsTrackerPort, UpstreamResolverPort};
use guardian_domain::{BlocklistSource, CustomRule, DecisionReason, DnsQuery, DomainError, RuleAction, RuleMatch, Verdict};

/// In-memory cache, shared by every scenario below so cache-hit behavior can
/// be exercised across two queries to the same key.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl CachePort for InMemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: String, value: Vec<u8>, _ttl_secs: u32) {
        self.entries.lock().unwrap().insert(key, value);
    }

    async fn stats(&self) -> guardian_domain::CacheStats {
        guardian_domain::CacheStats::default()
    }
}

/// Rules store backed by a plain `Vec<(domain, RuleMatch)>`, exact-match
/// only, mirroring the real store's matching contract.
#[derive(Default)]
pub struct FixedRulesStore {
    rules: Mutex<HashMap<String, RuleMatch>>,
    hits: Mutex<Vec<i64>>,
}

impl FixedRulesStore {
    pub fn with_rule(domain: &str, action: RuleAction, rule_id: i64) -> Self {
        let store = Self::default();
        store.rules.lock().unwrap().insert(
            domain.to_string(),
            RuleMatch { action, rule_id, category: "custom".into() },
        );
        store
    }

    pub fn hits(&self) -> Vec<i64> {
        self.hits.lock().unwrap().clone()
    }
}

#[async_trait]
impl RulesStorePort for FixedRulesStore {
    async fn add(&self, _action: RuleAction, _domain: &str, _category: &str, _reason: &str) -> Result<i64, DomainError> {
        Ok(1)
    }

    async fn remove(&self, _rule_id: i64) -> Result<(), DomainError> {
        Ok(())
    }

    fn check(&self, domain: &str) -> Option<RuleMatch> {
        self.rules.lock().unwrap().get(domain).cloned()
    }

    async fn increment_hit(&self, rule_id: i64) {
        self.hits.lock().unwrap().push(rule_id);
    }

    async fn list(&self) -> Result<Vec<CustomRule>, DomainError> {
        Ok(vec![])
    }
}

/// Blocklist store backed by a fixed set, testing the Decision Engine's
/// parent-domain matching contract (C3/C5, SPEC_FULL.md §8 scenario 2).
#[derive(Default)]
pub struct FixedBlocklistStore {
    blocked: Vec<String>,
}

impl FixedBlocklistStore {
    pub fn new(blocked: &[&str]) -> Self {
        Self { blocked: blocked.iter().map(|s| s.to_string()).collect() }
    }
}

#[async_trait]
impl BlocklistStorePort for FixedBlocklistStore {
    async fn sync_source(&self, _source: &BlocklistSource) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn list_sources(&self) -> Result<Vec<BlocklistSource>, DomainError> {
        Ok(vec![])
    }

    async fn add_source(&self, _source: BlocklistSource) -> Result<i64, DomainError> {
        Ok(1)
    }

    async fn remove_source(&self, _source_id: i64) -> Result<(), DomainError> {
        Ok(())
    }

    /// Mirrors the real store: a blocked entry blocks itself and every
    /// subdomain (SPEC_FULL.md §8 "parent matching").
    fn is_blocked(&self, fqdn: &str) -> Option<String> {
        self.blocked
            .iter()
            .find(|entry| fqdn == entry.as_str() || fqdn.ends_with(&format!(".{entry}")))
            .cloned()
    }

    fn union_indexed_count(&self) -> u64 {
        self.blocked.len() as u64
    }
}

/// Upstream resolver that always returns the same canned answer, standing
/// in for a real DoH round-trip (C2 is exercised on its own in
/// `crates/infrastructure`).
pub struct CannedResolver {
    answer: DnsAnswer,
}

impl CannedResolver {
    pub fn new(wire_bytes: Vec<u8>, min_ttl: u32) -> Self {
        Self { answer: DnsAnswer { wire_bytes, min_ttl } }
    }
}

#[async_trait]
impl UpstreamResolverPort for CannedResolver {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        Ok(self.answer.clone())
    }
}

/// Stats tracker recording every call, so scenarios can assert block/allow
/// counters moved the way §8 describes.
#[derive(Default)]
pub struct RecordingStats {
    recorded: Mutex<Vec<(String, Verdict, DecisionReason, bool)>>,
}

impl RecordingStats {
    pub fn recorded(&self) -> Vec<(String, Verdict, DecisionReason, bool)> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn block_count(&self) -> usize {
        self.recorded.lock().unwrap().iter().filter(|(_, v, ..)| *v == Verdict::Block).count()
    }
}

#[async_trait]
impl StatsTrackerPort for RecordingStats {
    fn record_query(&self, domain: &str, verdict: Verdict, reason: DecisionReason, is_cache_hit: bool) {
        self.recorded.lock().unwrap().push((domain.to_string(), verdict, reason, is_cache_hit));
    }

    async fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn summary(&self) -> guardian_domain::StatsSummary {
        guardian_domain::StatsSummary::default()
    }
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
