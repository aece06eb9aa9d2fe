use std::sync::Arc;

use guardian_domain::{validators, DomainError, RuleAction};

use crate::ports::RulesStorePort;

pub struct AddRuleUseCase {
    rules: Arc<dyn RulesStorePort>,
}

impl AddRuleUseCase {
    pub fn new(rules: Arc<dyn RulesStorePort>) -> Self {
        Self { rules }
    }

    pub async fn execute(
        &self,
        action: RuleAction,
        domain: &str,
        category: &str,
        reason: &str,
    ) -> Result<i64, DomainError> {
        let domain = validators::normalize_domain(domain);
        self.rules.add(action, &domain, category, reason).await
    }
}
