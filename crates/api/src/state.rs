use std::collections::HashMap;
use std::sync::Arc;

use guardian_application::{
    AddFirewallRuleUseCase, AddRuleUseCase, CheckHealthUseCase, FeedParserPort,
    GetBlocklistSourcesUseCase, GetFirewallDailyStatsUseCase, GetFirewallStatusUseCase,
    GetGuardianStatusUseCase, GetStatsSummaryUseCase, GetThreatStatsUseCase,
    InstallFirewallAdapterUseCase, ListFirewallEventsUseCase, ListFirewallRulesUseCase,
    ListRulesUseCase, ListThreatFeedsUseCase, LookupIndicatorUseCase, RemoveFirewallRuleUseCase,
    RemoveRuleUseCase, SyncAllFeedsUseCase, SyncPortRulesUseCase, SyncSingleFeedUseCase,
    SyncThreatRulesUseCase, ToggleFirewallRuleUseCase, UpdateAllBlocklistsUseCase,
};
use guardian_domain::Config;
use tokio::sync::RwLock;

/// Shared axum state: one `Arc<UseCase>` handle per operation, grouped by
/// subsystem, plus the feed-parser registry the threat handlers resolve
/// `{name}` against and the live mutable config the firewall handlers read
/// and patch.
#[derive(Clone)]
pub struct AppState {
    pub guardian_add_rule: Arc<AddRuleUseCase>,
    pub guardian_remove_rule: Arc<RemoveRuleUseCase>,
    pub guardian_list_rules: Arc<ListRulesUseCase>,
    pub guardian_blocklist_sources: Arc<GetBlocklistSourcesUseCase>,
    pub guardian_update_all_blocklists: Arc<UpdateAllBlocklistsUseCase>,
    pub guardian_stats: Arc<GetStatsSummaryUseCase>,
    pub guardian_status: Arc<GetGuardianStatusUseCase>,
    pub guardian_health: Arc<CheckHealthUseCase>,

    pub threat_sync_all: Arc<SyncAllFeedsUseCase>,
    pub threat_sync_single: Arc<SyncSingleFeedUseCase>,
    pub threat_stats: Arc<GetThreatStatsUseCase>,
    pub threat_lookup: Arc<LookupIndicatorUseCase>,
    pub threat_list_feeds: Arc<ListThreatFeedsUseCase>,
    pub threat_feed_parsers: Arc<HashMap<Arc<str>, Arc<dyn FeedParserPort>>>,

    pub firewall_add_rule: Arc<AddFirewallRuleUseCase>,
    pub firewall_remove_rule: Arc<RemoveFirewallRuleUseCase>,
    pub firewall_toggle_rule: Arc<ToggleFirewallRuleUseCase>,
    pub firewall_list_rules: Arc<ListFirewallRulesUseCase>,
    pub firewall_status: Arc<GetFirewallStatusUseCase>,
    pub firewall_list_events: Arc<ListFirewallEventsUseCase>,
    pub firewall_daily_stats: Arc<GetFirewallDailyStatsUseCase>,
    pub firewall_sync_threat_rules: Arc<SyncThreatRulesUseCase>,
    pub firewall_sync_port_rules: Arc<SyncPortRulesUseCase>,
    pub firewall_install_adapter: Arc<InstallFirewallAdapterUseCase>,

    pub config: Arc<RwLock<Config>>,
}
