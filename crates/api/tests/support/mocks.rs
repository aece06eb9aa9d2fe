use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use guardian_application::ports::threat_store_port::SubnetAggregate;
use guardian_application::{DnsAnswer, FeedConfig, ParsedIndicator, PlatformStatus};
use guardian_domain::{
    BlocklistSource, CacheStats, CustomRule, DecisionReason, DnsQuery, DomainError, FirewallEvent,
    FirewallRule, FirewallRuleType, RuleAction, RuleMatch, StatsSummary, ThreatFeed,
    ThreatIndicator, Verdict,
};

#[derive(Default)]
pub struct InMemoryRulesStore {
    next_id: AtomicI64,
    rules: Mutex<Vec<CustomRule>>,
}

#[async_trait]
impl guardian_application::RulesStorePort for InMemoryRulesStore {
    async fn add(
        &self,
        action: RuleAction,
        domain: &str,
        category: &str,
        reason: &str,
    ) -> Result<i64, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rules.lock().unwrap().push(CustomRule {
            id,
            action,
            domain: domain.into(),
            category: category.into(),
            reason: reason.into(),
            hit_count: 0,
            is_active: true,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        });
        Ok(id)
    }

    async fn remove(&self, rule_id: i64) -> Result<(), DomainError> {
        let mut rules = self.rules.lock().unwrap();
        match rules.iter_mut().find(|r| r.id == rule_id) {
            Some(rule) => {
                rule.is_active = false;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("rule {rule_id}"))),
        }
    }

    fn check(&self, domain: &str) -> Option<RuleMatch> {
        self.rules.lock().unwrap().iter().find(|r| r.is_active && &*r.domain == domain).map(|r| {
            RuleMatch { action: r.action, rule_id: r.id, category: r.category.clone() }
        })
    }

    async fn increment_hit(&self, rule_id: i64) {
        if let Some(rule) = self.rules.lock().unwrap().iter_mut().find(|r| r.id == rule_id) {
            rule.hit_count += 1;
        }
    }

    async fn list(&self) -> Result<Vec<CustomRule>, DomainError> {
        Ok(self.rules.lock().unwrap().iter().filter(|r| r.is_active).cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryCache;

#[async_trait]
impl guardian_application::CachePort for InMemoryCache {
    async fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    async fn set(&self, _key: String, _value: Vec<u8>, _ttl_secs: u32) {}

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

#[derive(Default)]
pub struct InMemoryBlocklistStore {
    sources: Mutex<Vec<BlocklistSource>>,
}

#[async_trait]
impl guardian_application::BlocklistStorePort for InMemoryBlocklistStore {
    async fn sync_source(&self, _source: &BlocklistSource) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn list_sources(&self) -> Result<Vec<BlocklistSource>, DomainError> {
        Ok(self.sources.lock().unwrap().clone())
    }

    async fn add_source(&self, source: BlocklistSource) -> Result<i64, DomainError> {
        let id = source.id;
        self.sources.lock().unwrap().push(source);
        Ok(id)
    }

    async fn remove_source(&self, source_id: i64) -> Result<(), DomainError> {
        self.sources.lock().unwrap().retain(|s| s.id != source_id);
        Ok(())
    }

    fn is_blocked(&self, _fqdn: &str) -> Option<String> {
        None
    }

    fn union_indexed_count(&self) -> u64 {
        0
    }
}

pub struct AlwaysUpResolver;

#[async_trait]
impl guardian_application::UpstreamResolverPort for AlwaysUpResolver {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        Ok(DnsAnswer { wire_bytes: Vec::new(), min_ttl: 30 })
    }
}

#[derive(Default)]
pub struct InMemoryStatsTracker {
    summary: Mutex<StatsSummary>,
}

#[async_trait]
impl guardian_application::StatsTrackerPort for InMemoryStatsTracker {
    fn record_query(&self, _domain: &str, _verdict: Verdict, _reason: DecisionReason, _is_cache_hit: bool) {}

    async fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn summary(&self) -> StatsSummary {
        self.summary.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct InMemoryThreatStore {
    feeds: Mutex<Vec<ThreatFeed>>,
    indicators: Mutex<HashMap<String, ThreatIndicator>>,
}

#[async_trait]
impl guardian_application::ThreatStorePort for InMemoryThreatStore {
    async fn ensure_feed_registered(
        &self,
        name: &str,
        feed_url: &str,
        feed_type: &str,
    ) -> Result<(), DomainError> {
        let mut feeds = self.feeds.lock().unwrap();
        if !feeds.iter().any(|f| &*f.name == name) {
            let id = feeds.len() as i64 + 1;
            feeds.push(ThreatFeed {
                id,
                name: name.into(),
                feed_url: feed_url.into(),
                feed_type: feed_type.into(),
                enabled: true,
                last_synced_at: None,
                entries_count: 0,
            });
        }
        Ok(())
    }

    async fn list_feeds(&self) -> Result<Vec<ThreatFeed>, DomainError> {
        Ok(self.feeds.lock().unwrap().clone())
    }

    async fn mark_feed_synced(&self, name: &str, entries_count: u64) -> Result<(), DomainError> {
        if let Some(feed) = self.feeds.lock().unwrap().iter_mut().find(|f| &*f.name == name) {
            feed.entries_count = entries_count;
            feed.last_synced_at = Some("2026-01-01T00:00:00Z".to_string());
        }
        Ok(())
    }

    async fn upsert_indicator(
        &self,
        subnet_hash: &str,
        subnet_prefix: Option<&str>,
        aggregate: &SubnetAggregate,
        score: f64,
        expires_at: &str,
    ) -> Result<ThreatIndicator, DomainError> {
        let indicator = ThreatIndicator {
            subnet_hash: subnet_hash.into(),
            subnet_prefix: subnet_prefix.map(Into::into),
            threat_score: score,
            source_feeds: aggregate.feeds.clone(),
            indicator_types: aggregate.types.clone(),
            cve_refs: Vec::new(),
            first_seen: "2026-01-01T00:00:00Z".to_string(),
            last_seen: "2026-01-01T00:00:00Z".to_string(),
            report_count: 1,
            expires_at: expires_at.to_string(),
        };
        self.indicators.lock().unwrap().insert(subnet_hash.to_string(), indicator.clone());
        Ok(indicator)
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
    ) -> Result<HashMap<std::sync::Arc<str>, ThreatIndicator>, DomainError> {
        Ok(self
            .indicators
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.threat_score >= threshold)
            .map(|i| (i.subnet_hash.clone(), i.clone()))
            .collect())
    }
}

pub struct StaticFeedParser {
    config: FeedConfig,
    indicators: Vec<ParsedIndicator>,
}

impl StaticFeedParser {
    pub fn new(name: &str, indicators: Vec<ParsedIndicator>) -> Self {
        Self {
            config: FeedConfig { name: name.into(), feed_url: "https://example.test/feed".into(), feed_type: "ip_list".into() },
            indicators,
        }
    }
}

#[async_trait]
impl guardian_application::FeedParserPort for StaticFeedParser {
    fn feed_config(&self) -> FeedConfig {
        self.config.clone()
    }

    async fn fetch(&self) -> Result<Vec<ParsedIndicator>, DomainError> {
        Ok(self.indicators.clone())
    }
}

#[derive(Default)]
pub struct InMemoryFirewallRuleStore {
    next_id: AtomicI64,
    rules: Mutex<Vec<FirewallRule>>,
    events: Mutex<Vec<FirewallEvent>>,
}

#[async_trait]
impl guardian_application::FirewallRuleStorePort for InMemoryFirewallRuleStore {
    async fn insert(&self, mut rule: FirewallRule) -> Result<i64, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rule.id = id;
        self.rules.lock().unwrap().push(rule);
        Ok(id)
    }

    async fn remove(&self, rule_id: i64) -> Result<(), DomainError> {
        self.rules.lock().unwrap().retain(|r| r.id != rule_id);
        Ok(())
    }

    async fn set_active(&self, rule_id: i64, is_active: bool) -> Result<(), DomainError> {
        match self.rules.lock().unwrap().iter_mut().find(|r| r.id == rule_id) {
            Some(rule) => {
                rule.is_active = is_active;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("firewall rule {rule_id}"))),
        }
    }

    async fn list_active(&self) -> Result<Vec<FirewallRule>, DomainError> {
        Ok(self.rules.lock().unwrap().iter().filter(|r| r.is_active).cloned().collect())
    }

    async fn exists(&self, rule_type: FirewallRuleType, target: &str) -> Result<bool, DomainError> {
        Ok(self.rules.lock().unwrap().iter().any(|r| r.rule_type == rule_type && &*r.target == target))
    }

    async fn increment_hit(&self, rule_id: i64) -> Result<(), DomainError> {
        if let Some(rule) = self.rules.lock().unwrap().iter_mut().find(|r| r.id == rule_id) {
            rule.hit_count += 1;
        }
        Ok(())
    }

    async fn record_event(&self, event: FirewallEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn list_events(&self, limit: u32) -> Result<Vec<FirewallEvent>, DomainError> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().rev().take(limit as usize).cloned().collect())
    }
}

pub struct NoopFirewallAdapter;

#[async_trait]
impl guardian_application::FirewallAdapterPort for NoopFirewallAdapter {
    async fn install(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn uninstall(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn apply_rules(&self, _rules: &[FirewallRule]) -> Result<(), DomainError> {
        Ok(())
    }

    async fn status(&self) -> Result<PlatformStatus, DomainError> {
        Ok(PlatformStatus {
            engine: "test".to_string(),
            installed: true,
            active_rule_count: 0,
            platform_name: "test",
            display_name: "Test Adapter".to_string(),
            required_privilege: "none".to_string(),
            minimum_os_version: "n/a".to_string(),
        })
    }

    fn platform_name(&self) -> &'static str {
        "test"
    }
}

pub struct AlwaysUpReputationClient;

#[async_trait]
impl guardian_application::ReputationClientPort for AlwaysUpReputationClient {
    async fn check(&self, ip: Ipv4Addr) -> Result<Option<guardian_domain::ReputationRecord>, DomainError> {
        Ok(Some(guardian_domain::ReputationRecord { ip, score: 0.5, raw_confidence: 50, total_reports: 1 }))
    }
}
