#![allow(dead_code)]

use async_trait::async_trait;
use guardian_application::ports::{
    BlocklistStorePort, CachePort, DnsAnswer, FirewallAdapterPort, FirewallRuleStorePort,
    PlatformStatus, RulesStorePort, StatsTrackerPort, ThreatStorePort, UpstreamResolverPort,
};
use guardian_application::ports::threat_store_port::SubnetAggregate;
use guardian_domain::{
    BlocklistSource, CustomRule, DecisionReason, DnsQuery, DomainError, FirewallEvent,
    FirewallRule, FirewallRuleType, RuleAction, RuleMatch, ThreatFeed, ThreatIndicator, Verdict,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory cache mock, one pre-seeded key at a time.
#[derive(Default)]
pub struct MockCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: Vec<u8>) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }
}

#[async_trait]
impl CachePort for MockCache {
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

/// Rules store mock: one exact-match entry at a time, settable by the test.
#[derive(Default)]
pub struct MockRulesStore {
    rule: Mutex<Option<RuleMatch>>,
    hits: Mutex<Vec<i64>>,
}

impl MockRulesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_match(&self, rule_match: RuleMatch) {
        *self.rule.lock().unwrap() = Some(rule_match);
    }

    pub fn hits(&self) -> Vec<i64> {
        self.hits.lock().unwrap().clone()
    }
}

#[async_trait]
impl RulesStorePort for MockRulesStore {
    async fn add(&self, _action: RuleAction, _domain: &str, _category: &str, _reason: &str) -> Result<i64, DomainError> {
        Ok(1)
    }

    async fn remove(&self, _rule_id: i64) -> Result<(), DomainError> {
        Ok(())
    }

    fn check(&self, _domain: &str) -> Option<RuleMatch> {
        self.rule.lock().unwrap().clone()
    }

    async fn increment_hit(&self, rule_id: i64) {
        self.hits.lock().unwrap().push(rule_id);
    }

    async fn list(&self) -> Result<Vec<CustomRule>, DomainError> {
        Ok(vec![])
    }
}

/// Blocklist store mock: a fixed set of blocked domains.
#[derive(Default)]
pub struct MockBlocklistStore {
    blocked: Mutex<Vec<String>>,
}

impl MockBlocklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, domain: &str) {
        self.blocked.lock().unwrap().push(domain.to_string());
    }
}

#[async_trait]
impl BlocklistStorePort for MockBlocklistStore {
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

    fn is_blocked(&self, fqdn: &str) -> Option<String> {
        self.blocked
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.as_str() == fqdn)
            .cloned()
    }

    fn union_indexed_count(&self) -> u64 {
        self.blocked.lock().unwrap().len() as u64
    }
}

/// Upstream resolver mock: always resolves or always fails, set by the test.
pub struct MockResolver {
    answer: Mutex<Option<DnsAnswer>>,
}

impl MockResolver {
    pub fn succeeding(wire_bytes: Vec<u8>, min_ttl: u32) -> Self {
        Self { answer: Mutex::new(Some(DnsAnswer { wire_bytes, min_ttl })) }
    }

    pub fn failing() -> Self {
        Self { answer: Mutex::new(None) }
    }
}

#[async_trait]
impl UpstreamResolverPort for MockResolver {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        self.answer
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::UpstreamUnavailable("mock configured to fail".into()))
    }
}

/// Stats tracker mock: records every call for later assertion.
#[derive(Default)]
pub struct MockStats {
    recorded: Mutex<Vec<(String, Verdict, DecisionReason, bool)>>,
}

impl MockStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<(String, Verdict, DecisionReason, bool)> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsTrackerPort for MockStats {
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

/// Firewall rule store mock: an in-memory `Vec<FirewallRule>`.
#[derive(Default)]
pub struct MockFirewallRuleStore {
    rules: Mutex<Vec<FirewallRule>>,
    next_id: Mutex<i64>,
}

impl MockFirewallRuleStore {
    pub fn new() -> Self {
        Self { rules: Mutex::new(vec![]), next_id: Mutex::new(1) }
    }

    pub fn rules(&self) -> Vec<FirewallRule> {
        self.rules.lock().unwrap().clone()
    }
}

#[async_trait]
impl FirewallRuleStorePort for MockFirewallRuleStore {
    async fn insert(&self, mut rule: FirewallRule) -> Result<i64, DomainError> {
        let mut next_id = self.next_id.lock().unwrap();
        rule.id = *next_id;
        *next_id += 1;
        self.rules.lock().unwrap().push(rule);
        Ok(*next_id - 1)
    }

    async fn remove(&self, rule_id: i64) -> Result<(), DomainError> {
        self.rules.lock().unwrap().retain(|r| r.id != rule_id);
        Ok(())
    }

    async fn set_active(&self, rule_id: i64, is_active: bool) -> Result<(), DomainError> {
        if let Some(rule) = self.rules.lock().unwrap().iter_mut().find(|r| r.id == rule_id) {
            rule.is_active = is_active;
        }
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<FirewallRule>, DomainError> {
        Ok(self.rules.lock().unwrap().iter().filter(|r| r.is_active).cloned().collect())
    }

    async fn exists(&self, rule_type: FirewallRuleType, target: &str) -> Result<bool, DomainError> {
        Ok(self
            .rules
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.rule_type == rule_type && r.target.as_ref() == target))
    }

    async fn increment_hit(&self, rule_id: i64) -> Result<(), DomainError> {
        if let Some(rule) = self.rules.lock().unwrap().iter_mut().find(|r| r.id == rule_id) {
            rule.hit_count += 1;
        }
        Ok(())
    }

    async fn record_event(&self, _event: FirewallEvent) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list_events(&self, _limit: u32) -> Result<Vec<FirewallEvent>, DomainError> {
        Ok(vec![])
    }
}

/// Firewall adapter mock: records every `apply_rules` call's snapshot.
#[derive(Default)]
pub struct MockFirewallAdapter {
    applied: Mutex<Vec<Vec<FirewallRule>>>,
}

impl MockFirewallAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }

    pub fn last_applied(&self) -> Option<Vec<FirewallRule>> {
        self.applied.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl FirewallAdapterPort for MockFirewallAdapter {
    async fn install(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn uninstall(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn apply_rules(&self, rules: &[FirewallRule]) -> Result<(), DomainError> {
        self.applied.lock().unwrap().push(rules.to_vec());
        Ok(())
    }

    async fn status(&self) -> Result<PlatformStatus, DomainError> {
        Ok(PlatformStatus {
            engine: "mock".into(),
            installed: true,
            active_rule_count: 0,
            platform_name: "mock",
            display_name: "Mock Adapter".into(),
            required_privilege: "none".into(),
            minimum_os_version: "n/a".into(),
        })
    }

    fn platform_name(&self) -> &'static str {
        "mock"
    }
}

/// Threat store mock: a fixed map keyed by subnet hash, returned verbatim
/// from `high_score_subnets` regardless of threshold/now (tests seed exactly
/// what they want returned).
#[derive(Default)]
pub struct MockThreatStore {
    indicators: Mutex<HashMap<Arc<str>, ThreatIndicator>>,
}

impl MockThreatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, indicator: ThreatIndicator) {
        self.indicators.lock().unwrap().insert(indicator.subnet_hash.clone(), indicator);
    }
}

#[async_trait]
impl ThreatStorePort for MockThreatStore {
    async fn ensure_feed_registered(&self, _name: &str, _feed_url: &str, _feed_type: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list_feeds(&self) -> Result<Vec<ThreatFeed>, DomainError> {
        Ok(vec![])
    }

    async fn mark_feed_synced(&self, _name: &str, _entries_count: u64) -> Result<(), DomainError> {
        Ok(())
    }

    async fn upsert_indicator(
        &self,
        _subnet_hash: &str,
        _subnet_prefix: Option<&str>,
        _aggregate: &SubnetAggregate,
        _score: f64,
        _expires_at: &str,
    ) -> Result<ThreatIndicator, DomainError> {
        Err(DomainError::NotFound("upsert_indicator not used in this test".into()))
    }

    async fn get_indicator(&self, subnet_hash: &str) -> Result<Option<ThreatIndicator>, DomainError> {
        Ok(self.indicators.lock().unwrap().get(subnet_hash).cloned())
    }

    async fn delete_expired(&self, _now: &str) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn active_indicators(&self, _now: &str) -> Result<Vec<ThreatIndicator>, DomainError> {
        Ok(self.indicators.lock().unwrap().values().cloned().collect())
    }

    async fn high_score_subnets(
        &self,
        threshold: f64,
        _now: &str,
    ) -> Result<HashMap<Arc<str>, ThreatIndicator>, DomainError> {
        Ok(self
            .indicators
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, ind)| ind.threat_score >= threshold)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
