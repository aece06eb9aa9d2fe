use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use guardian_application::ports::FeedParserPort;
use guardian_application::{
    AddFirewallRuleUseCase, AddRuleUseCase, CheckHealthUseCase, CheckReputationUseCase,
    DispatchAlertsUseCase, EvaluateDiffUseCase, GetBlocklistSourcesUseCase, GetFirewallDailyStatsUseCase,
    GetFirewallStatusUseCase, GetGuardianStatusUseCase, GetStatsSummaryUseCase, GetThreatStatsUseCase,
    HandleDnsQueryUseCase, InstallFirewallAdapterUseCase, ListFirewallEventsUseCase, ListFirewallRulesUseCase,
    ListRulesUseCase, ListThreatFeedsUseCase, LookupIndicatorUseCase, MakeDecisionUseCase,
    RemoveFirewallRuleUseCase, RemoveRuleUseCase, SyncAllFeedsUseCase, SyncPortRulesUseCase,
    SyncSingleFeedUseCase, SyncThreatRulesUseCase, ToggleFirewallRuleUseCase, UpdateAllBlocklistsUseCase,
};
use guardian_domain::Config;
use guardian_infrastructure::{DnsCache, DohResolver, WebhookAlertChannelPort};

use super::repositories::Repositories;

/// Every use case the Guardian Daemon wires up, grouped the way
/// `guardian_api::AppState` and the background jobs consume them.
pub struct UseCases {
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
    pub threat_check_reputation: Arc<CheckReputationUseCase>,
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

    pub alert_evaluate_diff: Arc<EvaluateDiffUseCase>,
    pub alert_dispatch: Arc<DispatchAlertsUseCase>,

    pub handle_dns_query: Arc<HandleDnsQueryUseCase>,
}

/// Feed parsers that need no injected URL/name (self-describing via
/// `feed_config()`), SPEC_FULL.md §4.9's registry minus the plain-IP-list
/// family which `ip_list_feed_parsers` builds separately.
fn self_describing_feed_parsers(http_client: &reqwest::Client, config: &Config) -> Vec<Arc<dyn FeedParserPort>> {
    vec![
        Arc::new(guardian_infrastructure::threat::feeds::ThreatFoxFeedParser::new(http_client.clone())),
        Arc::new(guardian_infrastructure::threat::feeds::UrlhausFeedParser::new(http_client.clone())),
        Arc::new(guardian_infrastructure::threat::feeds::AlienVaultFeedParser::new(
            http_client.clone(),
            config.threat.otx_api_key.clone(),
        )),
    ]
}

fn ip_list_feed_parsers(http_client: &reqwest::Client) -> Vec<Arc<dyn FeedParserPort>> {
    use guardian_infrastructure::threat::feeds::IpListFeedParser;

    const FIREHOL_BASE: &str = "https://raw.githubusercontent.com/firehol/blocklist-ipsets/master";
    vec![
        Arc::new(IpListFeedParser::new(
            http_client.clone(),
            "firehol_level1",
            &format!("{FIREHOL_BASE}/firehol_level1.netset"),
            "malicious",
        )),
        Arc::new(IpListFeedParser::new(
            http_client.clone(),
            "firehol_level2",
            &format!("{FIREHOL_BASE}/firehol_level2.netset"),
            "scanner",
        )),
        Arc::new(IpListFeedParser::new(
            http_client.clone(),
            "firehol_level3",
            &format!("{FIREHOL_BASE}/firehol_level3.netset"),
            "suspicious",
        )),
        Arc::new(IpListFeedParser::new(
            http_client.clone(),
            "cins_army",
            "https://cinsscore.com/list/ci-badguys.txt",
            "malicious",
        )),
    ]
}

impl UseCases {
    pub fn build(repos: &Repositories, config: &Config, http_client: reqwest::Client) -> Self {
        let cache: Arc<dyn guardian_application::ports::CachePort> = Arc::new(DnsCache::new(config.dns.cache_size));
        let resolver: Arc<dyn guardian_application::ports::UpstreamResolverPort> =
            Arc::new(DohResolver::new(&config.dns).expect("DNS resolver configuration is validated at startup"));
        let sinkhole_ip: Ipv4Addr = config.dns.sinkhole_ip.parse().unwrap_or(Ipv4Addr::UNSPECIFIED);

        let handle_dns_query = Arc::new(HandleDnsQueryUseCase::new(
            cache.clone(),
            MakeDecisionUseCase::new(repos.rules.clone(), repos.blocklist.clone()),
            repos.rules.clone(),
            resolver.clone(),
            repos.stats.clone(),
            sinkhole_ip,
        ));

        let mut feed_parsers = self_describing_feed_parsers(&http_client, config);
        feed_parsers.extend(ip_list_feed_parsers(&http_client));
        let feed_parser_map: HashMap<Arc<str>, Arc<dyn FeedParserPort>> = feed_parsers
            .iter()
            .map(|parser| (parser.feed_config().name, parser.clone()))
            .collect();

        let firewall_adapter = guardian_infrastructure::firewall::platform::current_adapter()
            .unwrap_or_else(|| Arc::new(guardian_infrastructure::firewall::adapters::LinuxFirewallAdapter::new()));

        let channels: Vec<Arc<dyn guardian_application::ports::AlertChannelPort>> =
            if config.alerts.webhook_url.is_empty() {
                Vec::new()
            } else {
                let min_severity = parse_severity(&config.alerts.min_severity);
                vec![Arc::new(WebhookAlertChannelPort::new(
                    http_client.clone(),
                    config.alerts.webhook_url.clone(),
                    min_severity,
                    config.alerts.webhook_timeout_ms,
                ))]
            };

        Self {
            guardian_add_rule: Arc::new(AddRuleUseCase::new(repos.rules.clone())),
            guardian_remove_rule: Arc::new(RemoveRuleUseCase::new(repos.rules.clone())),
            guardian_list_rules: Arc::new(ListRulesUseCase::new(repos.rules.clone())),
            guardian_blocklist_sources: Arc::new(GetBlocklistSourcesUseCase::new(repos.blocklist.clone())),
            guardian_update_all_blocklists: Arc::new(UpdateAllBlocklistsUseCase::new(repos.blocklist.clone())),
            guardian_stats: Arc::new(GetStatsSummaryUseCase::new(repos.stats.clone())),
            guardian_status: Arc::new(GetGuardianStatusUseCase::new(
                cache.clone(),
                repos.rules.clone(),
                repos.blocklist.clone(),
            )),
            guardian_health: Arc::new(CheckHealthUseCase::new(resolver, repos.blocklist.clone(), cache)),

            threat_sync_all: Arc::new(SyncAllFeedsUseCase::new(
                feed_parsers.clone(),
                repos.threat.clone(),
                config.threat.hmac_key.clone(),
                config.threat.expiry_days,
            )),
            threat_sync_single: Arc::new(SyncSingleFeedUseCase::new(
                repos.threat.clone(),
                config.threat.hmac_key.clone(),
                config.threat.expiry_days,
            )),
            threat_stats: Arc::new(GetThreatStatsUseCase::new(repos.threat.clone())),
            threat_lookup: Arc::new(LookupIndicatorUseCase::new(repos.threat.clone(), config.threat.hmac_key.clone())),
            threat_list_feeds: Arc::new(ListThreatFeedsUseCase::new(repos.threat.clone())),
            threat_check_reputation: Arc::new(CheckReputationUseCase::new(super::repositories::reputation_client(
                http_client.clone(),
                repos.reputation_pool.clone(),
                config,
            ))),
            threat_feed_parsers: Arc::new(feed_parser_map),

            firewall_add_rule: Arc::new(AddFirewallRuleUseCase::new(repos.firewall.clone(), firewall_adapter.clone())),
            firewall_remove_rule: Arc::new(RemoveFirewallRuleUseCase::new(
                repos.firewall.clone(),
                firewall_adapter.clone(),
            )),
            firewall_toggle_rule: Arc::new(ToggleFirewallRuleUseCase::new(
                repos.firewall.clone(),
                firewall_adapter.clone(),
            )),
            firewall_list_rules: Arc::new(ListFirewallRulesUseCase::new(repos.firewall.clone())),
            firewall_status: Arc::new(GetFirewallStatusUseCase::new(repos.firewall.clone(), firewall_adapter.clone())),
            firewall_list_events: Arc::new(ListFirewallEventsUseCase::new(repos.firewall.clone())),
            firewall_daily_stats: Arc::new(GetFirewallDailyStatsUseCase::new(repos.firewall.clone())),
            firewall_sync_threat_rules: Arc::new(SyncThreatRulesUseCase::new(
                repos.threat.clone(),
                repos.firewall.clone(),
                firewall_adapter.clone(),
                config.firewall.threat_score_threshold,
            )),
            firewall_sync_port_rules: Arc::new(SyncPortRulesUseCase::new(repos.firewall.clone(), firewall_adapter.clone())),
            firewall_install_adapter: Arc::new(InstallFirewallAdapterUseCase::new(firewall_adapter)),

            alert_evaluate_diff: Arc::new(EvaluateDiffUseCase::new(Vec::new(), config.alerts.mass_threshold)),
            alert_dispatch: Arc::new(DispatchAlertsUseCase::new(repos.alerts.clone(), channels)),

            handle_dns_query,
        }
    }
}

fn parse_severity(s: &str) -> guardian_domain::AlertSeverity {
    use guardian_domain::AlertSeverity;
    match s {
        "critical" => AlertSeverity::Critical,
        "warning" => AlertSeverity::Warning,
        _ => AlertSeverity::Info,
    }
}
