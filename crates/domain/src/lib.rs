//! Guardian Domain Layer: pure types, validation, and the error taxonomy.
//! No I/O, no async runtime dependency beyond what's needed for trait
//! signatures implemented elsewhere.

pub mod alert;
pub mod blocklist;
pub mod config;
pub mod decision;
pub mod dns_query;
pub mod errors;
pub mod firewall;
pub mod query_log;
pub mod rules;
pub mod threat;
pub mod validators;

pub use alert::{Alert, AlertDetail, AlertSeverity, AlertType, Asset, DiffResult, RogueRule};
pub use blocklist::{BlockedDomain, BlocklistFormat, BlocklistSource};
pub use config::{CliOverrides, Config, ConfigError};
pub use decision::{Decision, DecisionReason, Verdict};
pub use dns_query::{DnsQuery, RecordType};
pub use errors::{DomainError, DomainResult};
pub use firewall::{Direction, FirewallEvent, FirewallRule, FirewallRuleType, Protocol, RuleSource};
pub use query_log::{CacheStats, PeriodCounters, StatsSummary};
pub use rules::{CustomRule, RuleAction, RuleMatch};
pub use threat::{ReputationRecord, ThreatFeed, ThreatIndicator};
