pub mod add_rule;
pub mod check_health;
pub mod get_blocklist_sources;
pub mod get_cache_stats;
pub mod get_status;
pub mod get_stats_summary;
pub mod list_rules;
pub mod make_decision;
pub mod remove_rule;
pub mod update_all_blocklists;
pub mod update_blocklist_source;

pub use add_rule::AddRuleUseCase;
pub use check_health::{CheckHealthUseCase, HealthReport};
pub use get_blocklist_sources::{BlocklistSourcesReport, GetBlocklistSourcesUseCase};
pub use get_cache_stats::GetCacheStatsUseCase;
pub use get_status::{GetGuardianStatusUseCase, GuardianStatus};
pub use get_stats_summary::GetStatsSummaryUseCase;
pub use list_rules::ListRulesUseCase;
pub use make_decision::MakeDecisionUseCase;
pub use remove_rule::RemoveRuleUseCase;
pub use update_all_blocklists::UpdateAllBlocklistsUseCase;
pub use update_blocklist_source::UpdateBlocklistSourceUseCase;
