mod helpers;

use std::net::Ipv4Addr;
use std::sync::Arc;

use guardian_application::use_cases::dns::{HandleDnsQueryUseCase, QueryOutcome};
use guardian_application::use_cases::guardian::MakeDecisionUseCase;
use guardian_application::CachePort;
use guardian_domain::{DnsQuery, RecordType, RuleAction, RuleMatch, Verdict};
use helpers::mocks::{MockBlocklistStore, MockCache, MockResolver, MockRulesStore, MockStats};

fn decision_engine(rules: Arc<MockRulesStore>, blocklist: Arc<MockBlocklistStore>) -> MakeDecisionUseCase {
    MakeDecisionUseCase::new(rules, blocklist)
}

#[tokio::test]
async fn cache_hit_skips_decision_and_resolver() {
    let cache = Arc::new(MockCache::new());
    cache.seed("example.com:A", vec![1, 2, 3]);
    let rules = Arc::new(MockRulesStore::new());
    let blocklist = Arc::new(MockBlocklistStore::new());
    let resolver = Arc::new(MockResolver::failing());
    let stats = Arc::new(MockStats::new());

    let use_case = HandleDnsQueryUseCase::new(
        cache,
        decision_engine(rules, blocklist),
        Arc::new(MockRulesStore::new()),
        resolver,
        stats.clone(),
        Ipv4Addr::new(0, 0, 0, 0),
    );

    let query = DnsQuery::new("example.com", RecordType::A);
    let outcome = use_case.execute(&query).await;

    match outcome {
        QueryOutcome::CacheHit { wire_bytes } => assert_eq!(wire_bytes, vec![1, 2, 3]),
        other => panic!("expected CacheHit, got {other:?}"),
    }
    assert_eq!(stats.recorded().len(), 1);
    assert!(stats.recorded()[0].3, "cache hit flag should be true");
}

#[tokio::test]
async fn blocked_domain_sinkholes_and_increments_hit() {
    let cache = Arc::new(MockCache::new());
    let rules_for_decision = Arc::new(MockRulesStore::new());
    rules_for_decision.set_match(RuleMatch { action: RuleAction::Block, rule_id: 42, category: "malware".into() });
    let blocklist = Arc::new(MockBlocklistStore::new());
    let resolver = Arc::new(MockResolver::failing());
    let stats = Arc::new(MockStats::new());
    let rules_for_hits = Arc::new(MockRulesStore::new());
    rules_for_hits.set_match(RuleMatch { action: RuleAction::Block, rule_id: 42, category: "malware".into() });

    let use_case = HandleDnsQueryUseCase::new(
        cache,
        decision_engine(rules_for_decision, blocklist),
        rules_for_hits.clone(),
        resolver,
        stats.clone(),
        Ipv4Addr::new(10, 0, 0, 1),
    );

    let query = DnsQuery::new("evil.example", RecordType::A);
    let outcome = use_case.execute(&query).await;

    match outcome {
        QueryOutcome::Sinkhole { ip, .. } => assert_eq!(ip, Ipv4Addr::new(10, 0, 0, 1)),
        other => panic!("expected Sinkhole, got {other:?}"),
    }
    assert_eq!(rules_for_hits.hits(), vec![42]);
}

#[tokio::test]
async fn allowed_domain_resolves_upstream_and_caches() {
    let cache = Arc::new(MockCache::new());
    let rules = Arc::new(MockRulesStore::new());
    let blocklist = Arc::new(MockBlocklistStore::new());
    let resolver = Arc::new(MockResolver::succeeding(vec![9, 9, 9], 120));
    let stats = Arc::new(MockStats::new());

    let use_case = HandleDnsQueryUseCase::new(
        cache.clone(),
        decision_engine(rules, blocklist),
        Arc::new(MockRulesStore::new()),
        resolver,
        stats,
        Ipv4Addr::new(0, 0, 0, 0),
    );

    let query = DnsQuery::new("allowed.example", RecordType::A);
    let outcome = use_case.execute(&query).await;

    match outcome {
        QueryOutcome::Upstream { wire_bytes } => assert_eq!(wire_bytes, vec![9, 9, 9]),
        other => panic!("expected Upstream, got {other:?}"),
    }
    assert_eq!(cache.get("allowed.example:A").await, Some(vec![9, 9, 9]));
}

#[tokio::test]
async fn upstream_failure_returns_servfail() {
    let cache = Arc::new(MockCache::new());
    let rules = Arc::new(MockRulesStore::new());
    let blocklist = Arc::new(MockBlocklistStore::new());
    let resolver = Arc::new(MockResolver::failing());
    let stats = Arc::new(MockStats::new());

    let use_case = HandleDnsQueryUseCase::new(
        cache,
        decision_engine(rules, blocklist),
        Arc::new(MockRulesStore::new()),
        resolver,
        stats.clone(),
        Ipv4Addr::new(0, 0, 0, 0),
    );

    let query = DnsQuery::new("down.example", RecordType::A);
    let outcome = use_case.execute(&query).await;

    assert!(matches!(outcome, QueryOutcome::ServFail));
    // A resolver error is neither an allow nor a block: it must not inflate
    // the allowed-queries counter the way the original's "error" action doesn't.
    assert_eq!(stats.recorded()[0].1, Verdict::Error);
}
