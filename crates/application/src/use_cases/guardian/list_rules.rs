use std::sync::Arc;

use guardian_domain::{CustomRule, DomainError};

use crate::ports::RulesStorePort;

pub struct ListRulesUseCase {
    rules: Arc<dyn RulesStorePort>,
}

impl ListRulesUseCase {
    pub fn new(rules: Arc<dyn RulesStorePort>) -> Self {
        Self { rules }
    }

    pub async fn execute(&self) -> Result<Vec<CustomRule>, DomainError> {
        self.rules.list().await
    }
}
