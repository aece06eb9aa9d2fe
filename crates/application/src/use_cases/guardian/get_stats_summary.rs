use std::sync::Arc;

use guardian_domain::StatsSummary;

use crate::ports::StatsTrackerPort;

pub struct GetStatsSummaryUseCase {
    stats: Arc<dyn StatsTrackerPort>,
}

impl GetStatsSummaryUseCase {
    pub fn new(stats: Arc<dyn StatsTrackerPort>) -> Self {
        Self { stats }
    }

    pub fn execute(&self) -> StatsSummary {
        self.stats.summary()
    }
}
