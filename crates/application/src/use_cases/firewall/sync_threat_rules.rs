use std::sync::Arc;

use chrono::Utc;
use guardian_domain::{Direction, DomainError, FirewallRule, FirewallRuleType, Protocol, RuleSource};

use crate::ports::{FirewallAdapterPort, FirewallRuleStorePort, ThreatStorePort};

/// Firewall Service `sync_threat_rules()` (C12), SPEC_FULL.md §4.12.
///
/// Target resolution: a high-score subnet's firewall target is its
/// cleartext `subnet_prefix` when the ingestor retained one (private/CGNAT
/// ranges); for public subnets only the HMAC hash is ever persisted, so the
/// hash itself becomes the rule's target. Adapters that need a literal CIDR
/// to materialise a native rule treat a non-CIDR target as a documented
/// no-op (SPEC_FULL.md §4.13) and log it; the rule still exists for
/// audit/API visibility.
pub struct SyncThreatRulesUseCase {
    threat_store: Arc<dyn ThreatStorePort>,
    rule_store: Arc<dyn FirewallRuleStorePort>,
    adapter: Arc<dyn FirewallAdapterPort>,
    threshold: f64,
}

impl SyncThreatRulesUseCase {
    pub fn new(
        threat_store: Arc<dyn ThreatStorePort>,
        rule_store: Arc<dyn FirewallRuleStorePort>,
        adapter: Arc<dyn FirewallAdapterPort>,
        threshold: f64,
    ) -> Self {
        Self { threat_store, rule_store, adapter, threshold }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let now = Utc::now().to_rfc3339();
        let subnets = self.threat_store.high_score_subnets(self.threshold, &now).await?;

        let mut inserted = 0u64;
        for indicator in subnets.values() {
            let target = indicator
                .subnet_prefix
                .clone()
                .unwrap_or_else(|| indicator.subnet_hash.clone());

            if self.rule_store.exists(FirewallRuleType::BlockIp, &target).await? {
                continue;
            }

            let rule = FirewallRule {
                id: 0,
                rule_type: FirewallRuleType::BlockIp,
                target,
                direction: Direction::Outbound,
                protocol: Protocol::Any,
                source: RuleSource::ThreatIntel,
                reason: format!("threat score {:.2}", indicator.threat_score).into(),
                is_active: true,
                created_at: now.clone(),
                expires_at: Some(indicator.expires_at.clone()),
                hit_count: 0,
            };

            self.rule_store.insert(rule).await?;
            inserted += 1;
        }

        if inserted > 0 {
            let active = self.rule_store.list_active().await?;
            self.adapter.apply_rules(&active).await?;
        }

        Ok(inserted)
    }
}
