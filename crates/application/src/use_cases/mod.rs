pub mod alerts;
pub mod dns;
pub mod firewall;
pub mod guardian;
pub mod threat;

pub use alerts::{DispatchAlertsUseCase, EvaluateDiffUseCase};
pub use dns::{HandleDnsQueryUseCase, QueryOutcome};
pub use firewall::{
    AddFirewallRuleUseCase, DailyEventCount, GetFirewallDailyStatsUseCase, GetFirewallStatusUseCase,
    InstallFirewallAdapterUseCase, ListFirewallEventsUseCase, ListFirewallRulesUseCase,
    RemoveFirewallRuleUseCase, SyncPortRulesUseCase, SyncThreatRulesUseCase,
    ToggleFirewallRuleUseCase,
};
pub use guardian::{
    AddRuleUseCase, BlocklistSourcesReport, CheckHealthUseCase, GetBlocklistSourcesUseCase,
    GetCacheStatsUseCase, GetGuardianStatusUseCase, GetStatsSummaryUseCase, GuardianStatus,
    HealthReport, ListRulesUseCase, MakeDecisionUseCase, RemoveRuleUseCase,
    UpdateAllBlocklistsUseCase, UpdateBlocklistSourceUseCase,
};
pub use threat::{
    CheckReputationUseCase, GetThreatStatsUseCase, ListThreatFeedsUseCase, LookupIndicatorUseCase,
    SyncAllFeedsUseCase, SyncReport, SyncSingleFeedUseCase,
};
