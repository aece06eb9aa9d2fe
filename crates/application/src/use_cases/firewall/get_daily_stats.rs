use std::collections::BTreeMap;
use std::sync::Arc;

use guardian_domain::DomainError;

use crate::ports::FirewallRuleStorePort;

#[derive(Debug, Clone, Default)]
pub struct DailyEventCount {
    pub date: String,
    pub count: u64,
}

/// Backs `GET /api/firewall/stats/daily`: a rollup of recorded events by
/// calendar day, derived from the audit log rather than a dedicated table.
pub struct GetFirewallDailyStatsUseCase {
    store: Arc<dyn FirewallRuleStorePort>,
}

impl GetFirewallDailyStatsUseCase {
    pub fn new(store: Arc<dyn FirewallRuleStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, limit: u32) -> Result<Vec<DailyEventCount>, DomainError> {
        let events = self.store.list_events(limit).await?;
        let mut by_day: BTreeMap<String, u64> = BTreeMap::new();

        for event in &events {
            let date = event.created_at.get(..10).unwrap_or(&event.created_at).to_string();
            *by_day.entry(date).or_insert(0) += 1;
        }

        Ok(by_day
            .into_iter()
            .map(|(date, count)| DailyEventCount { date, count })
            .collect())
    }
}
