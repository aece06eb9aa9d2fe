use std::net::Ipv4Addr;
use std::sync::Arc;

use guardian_domain::{decision::SINKHOLE_TTL_SECS, DnsQuery, Verdict};

use crate::ports::{CachePort, RulesStorePort, StatsTrackerPort, UpstreamResolverPort};
use crate::use_cases::guardian::MakeDecisionUseCase;

/// What the DNS Server (C6) transport layer must do to answer the client.
/// Wire-level serialization (overwriting the transaction ID, building the
/// synthesized sinkhole record) stays in infrastructure, which owns the
/// codec; this use case only decides which of these four things happens.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    CacheHit { wire_bytes: Vec<u8> },
    Sinkhole { ip: Ipv4Addr, ttl: u32 },
    Upstream { wire_bytes: Vec<u8> },
    ServFail,
}

/// DNS Server (C6) query orchestrator: cache -> decide -> resolve -> cache
/// -> stats, per SPEC_FULL.md §4.6 steps 2-6 (step 1, wire parsing, is an
/// infrastructure concern that happens before this use case is invoked).
pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn CachePort>,
    decision_engine: MakeDecisionUseCase,
    rules: Arc<dyn RulesStorePort>,
    resolver: Arc<dyn UpstreamResolverPort>,
    stats: Arc<dyn StatsTrackerPort>,
    sinkhole_ip: Ipv4Addr,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn CachePort>,
        decision_engine: MakeDecisionUseCase,
        rules: Arc<dyn RulesStorePort>,
        resolver: Arc<dyn UpstreamResolverPort>,
        stats: Arc<dyn StatsTrackerPort>,
        sinkhole_ip: Ipv4Addr,
    ) -> Self {
        Self { cache, decision_engine, rules, resolver, stats, sinkhole_ip }
    }

    pub async fn execute(&self, query: &DnsQuery) -> QueryOutcome {
        let cache_key = query.cache_key();

        if let Some(wire_bytes) = self.cache.get(&cache_key).await {
            self.stats.record_query(
                &query.domain,
                Verdict::Allow,
                guardian_domain::DecisionReason::DefaultAllow,
                true,
            );
            return QueryOutcome::CacheHit { wire_bytes };
        }

        let decision = self.decision_engine.decide(&query.domain);

        if decision.is_block() {
            if let Some(rule_id) = decision.matched_rule_id {
                self.rules.increment_hit(rule_id).await;
            }
            self.stats.record_query(&query.domain, decision.verdict, decision.reason, false);
            return QueryOutcome::Sinkhole { ip: self.sinkhole_ip, ttl: SINKHOLE_TTL_SECS };
        }

        match self.resolver.resolve(query).await {
            Ok(answer) => {
                self.cache
                    .set(cache_key, answer.wire_bytes.clone(), answer.min_ttl)
                    .await;
                self.stats.record_query(&query.domain, decision.verdict, decision.reason, false);
                QueryOutcome::Upstream { wire_bytes: answer.wire_bytes }
            }
            Err(_) => {
                self.stats.record_query(&query.domain, Verdict::Error, decision.reason, false);
                QueryOutcome::ServFail
            }
        }
    }
}
