pub mod alert_channel_port;
pub mod alert_store_port;
pub mod blocklist_store_port;
pub mod cache_port;
pub mod feed_parser_port;
pub mod firewall_adapter_port;
pub mod firewall_rule_store_port;
pub mod reputation_client_port;
pub mod rules_store_port;
pub mod stats_tracker_port;
pub mod threat_store_port;
pub mod upstream_resolver_port;

pub use alert_channel_port::AlertChannelPort;
pub use alert_store_port::AlertStorePort;
pub use blocklist_store_port::BlocklistStorePort;
pub use cache_port::CachePort;
pub use feed_parser_port::{FeedConfig, FeedParserPort, ParsedIndicator};
pub use firewall_adapter_port::{FirewallAdapterPort, PlatformStatus};
pub use firewall_rule_store_port::FirewallRuleStorePort;
pub use reputation_client_port::ReputationClientPort;
pub use rules_store_port::RulesStorePort;
pub use stats_tracker_port::StatsTrackerPort;
pub use threat_store_port::{ThreatStatsSummary, ThreatStorePort};
pub use upstream_resolver_port::{DnsAnswer, UpstreamResolverPort};
