//! End-to-end DNS decision scenarios, the literal inputs/outputs from the
//! Guardian core's testable-properties list: sinkhole on blocklist hit,
//! parent-domain blocking, and custom allow overriding a blocklist entry.

mod common;

use std::net::Ipv4Addr;
use std::sync::Arc;

use common::{arc, CannedResolver, FixedBlocklistStore, FixedRulesStore, InMemoryCache, RecordingStats};
use guardian_application::use_cases::dns::{HandleDnsQueryUseCase, QueryOutcome};
use guardian_application::use_cases::guardian::MakeDecisionUseCase;
use guardian_application::CachePort;
use guardian_domain::{decision::SINKHOLE_TTL_SECS, DnsQuery, RecordType, RuleAction};

fn upstream_answer() -> Vec<u8> {
    vec![0xAB, 0xCD, 0xEF]
}

#[tokio::test]
async fn sinkhole_on_blocklist_hit() {
    let rules = arc(FixedRulesStore::default());
    let blocklist = arc(FixedBlocklistStore::new(&["ads.doubleclick.net"]));
    let cache = arc(InMemoryCache::default());
    let resolver = arc(CannedResolver::new(upstream_answer(), 60));
    let stats = arc(RecordingStats::default());

    let use_case = HandleDnsQueryUseCase::new(
        cache,
        MakeDecisionUseCase::new(rules, blocklist),
        Arc::new(FixedRulesStore::default()),
        resolver,
        stats.clone(),
        Ipv4Addr::new(0, 0, 0, 0),
    );

    let outcome = use_case.execute(&DnsQuery::new("ads.doubleclick.net", RecordType::A)).await;

    match outcome {
        QueryOutcome::Sinkhole { ip, ttl } => {
            assert_eq!(ip, Ipv4Addr::new(0, 0, 0, 0));
            assert_eq!(ttl, SINKHOLE_TTL_SECS);
        }
        other => panic!("expected sinkhole, got {other:?}"),
    }
    assert_eq!(stats.block_count(), 1);
}

#[tokio::test]
async fn parent_domain_blocking_covers_every_subdomain() {
    let blocklist = arc(FixedBlocklistStore::new(&["evil.com"]));
    let decision_engine = MakeDecisionUseCase::new(arc(FixedRulesStore::default()), blocklist);

    assert!(decision_engine.decide("sub.evil.com").is_block());
    assert!(decision_engine.decide("deep.sub.evil.com").is_block());
    assert!(!decision_engine.decide("notevil.com").is_block());
}

#[tokio::test]
async fn custom_allow_overrides_blocklist() {
    let rules = arc(FixedRulesStore::with_rule("tracker.example.com", RuleAction::Allow, 7));
    let blocklist = arc(FixedBlocklistStore::new(&["tracker.example.com"]));
    let cache = arc(InMemoryCache::default());
    let resolver = arc(CannedResolver::new(upstream_answer(), 60));
    let stats = arc(RecordingStats::default());

    let use_case = HandleDnsQueryUseCase::new(
        cache,
        MakeDecisionUseCase::new(rules.clone(), blocklist),
        rules.clone(),
        resolver,
        stats.clone(),
        Ipv4Addr::new(0, 0, 0, 0),
    );

    let outcome = use_case.execute(&DnsQuery::new("tracker.example.com", RecordType::A)).await;

    match outcome {
        QueryOutcome::Upstream { wire_bytes } => assert_eq!(wire_bytes, upstream_answer()),
        other => panic!("expected upstream passthrough, got {other:?}"),
    }
    assert_eq!(stats.block_count(), 0);
}

#[tokio::test]
async fn cache_hit_short_circuits_decision_and_resolve() {
    let cache = arc(InMemoryCache::default());
    let query = DnsQuery::new("cached.example.com", RecordType::A);
    cache.set(query.cache_key(), upstream_answer(), 60).await;

    // A blocklist entry for the same domain must not matter: the cache is
    // consulted first (SPEC_FULL.md §4.6 step 2).
    let blocklist = arc(FixedBlocklistStore::new(&["cached.example.com"]));
    let resolver = arc(CannedResolver::new(vec![0xFF], 60));
    let stats = arc(RecordingStats::default());

    let use_case = HandleDnsQueryUseCase::new(
        cache,
        MakeDecisionUseCase::new(arc(FixedRulesStore::default()), blocklist),
        arc(FixedRulesStore::default()),
        resolver,
        stats.clone(),
        Ipv4Addr::new(0, 0, 0, 0),
    );

    let outcome = use_case.execute(&query).await;
    match outcome {
        QueryOutcome::CacheHit { wire_bytes } => assert_eq!(wire_bytes, upstream_answer()),
        other => panic!("expected cache hit, got {other:?}"),
    }
}
