use std::sync::Arc;

use chrono::Utc;
use guardian_domain::firewall::HIGH_RISK_PORTS;
use guardian_domain::{Direction, DomainError, FirewallRule, FirewallRuleType, RuleSource};

use crate::ports::{FirewallAdapterPort, FirewallRuleStorePort};

/// Firewall Service `sync_port_rules()` (C12), SPEC_FULL.md §4.12: project
/// the fixed high-risk port table into inbound `block_port` rules, one per
/// port not already present.
pub struct SyncPortRulesUseCase {
    rule_store: Arc<dyn FirewallRuleStorePort>,
    adapter: Arc<dyn FirewallAdapterPort>,
}

impl SyncPortRulesUseCase {
    pub fn new(rule_store: Arc<dyn FirewallRuleStorePort>, adapter: Arc<dyn FirewallAdapterPort>) -> Self {
        Self { rule_store, adapter }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let now = Utc::now().to_rfc3339();
        let mut inserted = 0u64;

        for (port, protocol, label) in HIGH_RISK_PORTS {
            let target: Arc<str> = port.to_string().into();
            if self.rule_store.exists(FirewallRuleType::BlockPort, &target).await? {
                continue;
            }

            let rule = FirewallRule {
                id: 0,
                rule_type: FirewallRuleType::BlockPort,
                target,
                direction: Direction::Inbound,
                protocol: *protocol,
                source: RuleSource::Remediation,
                reason: format!("high-risk service: {label}").into(),
                is_active: true,
                created_at: now.clone(),
                expires_at: None,
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
