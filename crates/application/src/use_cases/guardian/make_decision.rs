use std::sync::Arc;

use guardian_domain::{Decision, DecisionReason, RuleAction};

use crate::ports::{BlocklistStorePort, RulesStorePort};

/// Decision Engine (C5): a pure function on a domain name, consulting the
/// Rules Store first, then the Blocklist Store. SPEC_FULL.md §4.5.
pub struct MakeDecisionUseCase {
    rules: Arc<dyn RulesStorePort>,
    blocklist: Arc<dyn BlocklistStorePort>,
}

impl MakeDecisionUseCase {
    pub fn new(rules: Arc<dyn RulesStorePort>, blocklist: Arc<dyn BlocklistStorePort>) -> Self {
        Self { rules, blocklist }
    }

    pub fn decide(&self, domain: &str) -> Decision {
        if let Some(rule_match) = self.rules.check(domain) {
            return match rule_match.action {
                RuleAction::Allow => {
                    Decision::allow(DecisionReason::CustomAllow, Some(rule_match.rule_id))
                }
                RuleAction::Block => {
                    Decision::block(DecisionReason::CustomBlock, Some(rule_match.rule_id))
                }
            };
        }

        if self.blocklist.is_blocked(domain).is_some() {
            return Decision::block(DecisionReason::Blocklist, None);
        }

        Decision::allow(DecisionReason::DefaultAllow, None)
    }
}
