//! Concrete adapters for every application-layer port: SQLite persistence,
//! the DNS wire codec and resolver, and the threat/firewall integrations.
//! See SPEC_FULL.md §10.1.

pub mod alerts;
pub mod database;
pub mod dns;
pub mod firewall;
pub mod repositories;
pub mod threat;

pub use alerts::WebhookAlertChannelPort;
pub use dns::{DnsCache, DnsServerHandler, DohResolver};
pub use firewall::adapters::{LinuxFirewallAdapter, MacOsFirewallAdapter, WindowsFirewallAdapter};
pub use repositories::{
    SqliteAlertStore, SqliteBlocklistStore, SqliteFirewallRuleStore, SqliteRulesStore, SqliteStatsTracker,
    SqliteThreatStore,
};
pub use threat::AbuseIpDbReputationClient;
