use std::sync::Arc;

use guardian_domain::DomainError;

use crate::ports::RulesStorePort;

pub struct RemoveRuleUseCase {
    rules: Arc<dyn RulesStorePort>,
}

impl RemoveRuleUseCase {
    pub fn new(rules: Arc<dyn RulesStorePort>) -> Self {
        Self { rules }
    }

    pub async fn execute(&self, rule_id: i64) -> Result<(), DomainError> {
        self.rules.remove(rule_id).await
    }
}
