pub mod add_rule;
pub mod get_daily_stats;
pub mod get_status;
pub mod install_adapter;
pub mod list_events;
pub mod list_rules;
pub mod remove_rule;
pub mod sync_port_rules;
pub mod sync_threat_rules;
pub mod toggle_rule;

pub use add_rule::AddFirewallRuleUseCase;
pub use get_daily_stats::{DailyEventCount, GetFirewallDailyStatsUseCase};
pub use get_status::GetFirewallStatusUseCase;
pub use install_adapter::InstallFirewallAdapterUseCase;
pub use list_events::ListFirewallEventsUseCase;
pub use list_rules::ListFirewallRulesUseCase;
pub use remove_rule::RemoveFirewallRuleUseCase;
pub use sync_port_rules::SyncPortRulesUseCase;
pub use sync_threat_rules::SyncThreatRulesUseCase;
pub use toggle_rule::ToggleFirewallRuleUseCase;
