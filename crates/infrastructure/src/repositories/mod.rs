pub mod alert_repository;
pub mod blocklist_repository;
pub mod firewall_repository;
pub mod rules_repository;
pub mod stats_repository;
pub mod threat_repository;

pub use alert_repository::SqliteAlertStore;
pub use blocklist_repository::SqliteBlocklistStore;
pub use firewall_repository::SqliteFirewallRuleStore;
pub use rules_repository::SqliteRulesStore;
pub use stats_repository::SqliteStatsTracker;
pub use threat_repository::SqliteThreatStore;
