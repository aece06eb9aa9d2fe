mod helpers;

use std::sync::Arc;

use guardian_application::use_cases::firewall::{SyncPortRulesUseCase, SyncThreatRulesUseCase};
use guardian_domain::FirewallRuleType;
use guardian_domain::ThreatIndicator;
use helpers::mocks::{MockFirewallAdapter, MockFirewallRuleStore, MockThreatStore};

fn indicator(subnet_hash: &str, subnet_prefix: Option<&str>, score: f64) -> ThreatIndicator {
    ThreatIndicator {
        subnet_hash: subnet_hash.into(),
        subnet_prefix: subnet_prefix.map(Into::into),
        threat_score: score,
        source_feeds: Default::default(),
        indicator_types: Default::default(),
        cve_refs: vec![],
        first_seen: "2026-01-01T00:00:00Z".into(),
        last_seen: "2026-01-01T00:00:00Z".into(),
        report_count: 1,
        expires_at: "2099-01-01T00:00:00Z".into(),
    }
}

#[tokio::test]
async fn sync_threat_rules_prefers_cleartext_subnet_over_hash() {
    let threat_store = Arc::new(MockThreatStore::new());
    threat_store.seed(indicator("deadbeef", Some("10.0.0.0/24"), 0.9));
    let rule_store = Arc::new(MockFirewallRuleStore::new());
    let adapter = Arc::new(MockFirewallAdapter::new());

    let use_case = SyncThreatRulesUseCase::new(threat_store, rule_store.clone(), adapter.clone(), 0.7);
    let inserted = use_case.execute().await.unwrap();

    assert_eq!(inserted, 1);
    let rules = rule_store.rules();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].target.as_ref(), "10.0.0.0/24");
    assert_eq!(rules[0].rule_type, FirewallRuleType::BlockIp);
    assert_eq!(adapter.apply_count(), 1);
}

#[tokio::test]
async fn sync_threat_rules_falls_back_to_hash_for_public_subnets() {
    let threat_store = Arc::new(MockThreatStore::new());
    threat_store.seed(indicator("cafef00d", None, 0.95));
    let rule_store = Arc::new(MockFirewallRuleStore::new());
    let adapter = Arc::new(MockFirewallAdapter::new());

    let use_case = SyncThreatRulesUseCase::new(threat_store, rule_store.clone(), adapter, 0.7);
    let inserted = use_case.execute().await.unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(rule_store.rules()[0].target.as_ref(), "cafef00d");
}

#[tokio::test]
async fn sync_threat_rules_skips_subnets_below_threshold() {
    let threat_store = Arc::new(MockThreatStore::new());
    threat_store.seed(indicator("lowscore", Some("192.168.1.0/24"), 0.3));
    let rule_store = Arc::new(MockFirewallRuleStore::new());
    let adapter = Arc::new(MockFirewallAdapter::new());

    let use_case = SyncThreatRulesUseCase::new(threat_store, rule_store.clone(), adapter.clone(), 0.7);
    let inserted = use_case.execute().await.unwrap();

    assert_eq!(inserted, 0);
    assert!(rule_store.rules().is_empty());
    assert_eq!(adapter.apply_count(), 0);
}

#[tokio::test]
async fn sync_threat_rules_is_idempotent() {
    let threat_store = Arc::new(MockThreatStore::new());
    threat_store.seed(indicator("deadbeef", Some("10.0.0.0/24"), 0.9));
    let rule_store = Arc::new(MockFirewallRuleStore::new());
    let adapter = Arc::new(MockFirewallAdapter::new());

    let use_case = SyncThreatRulesUseCase::new(threat_store, rule_store.clone(), adapter, 0.7);
    use_case.execute().await.unwrap();
    let second_pass = use_case.execute().await.unwrap();

    assert_eq!(second_pass, 0, "rule already exists for this target");
    assert_eq!(rule_store.rules().len(), 1);
}

#[tokio::test]
async fn sync_port_rules_inserts_every_high_risk_port_once() {
    let rule_store = Arc::new(MockFirewallRuleStore::new());
    let adapter = Arc::new(MockFirewallAdapter::new());

    let use_case = SyncPortRulesUseCase::new(rule_store.clone(), adapter);
    let inserted = use_case.execute().await.unwrap();

    assert_eq!(inserted as usize, guardian_domain::firewall::HIGH_RISK_PORTS.len());
    assert!(rule_store.rules().iter().all(|r| r.rule_type == FirewallRuleType::BlockPort));

    let use_case_again = SyncPortRulesUseCase::new(rule_store, Arc::new(MockFirewallAdapter::new()));
    assert_eq!(use_case_again.execute().await.unwrap(), 0);
}
