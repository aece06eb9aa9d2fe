//! Configuration module for the Guardian core
//!
//! Organised by concern, one sub-config per §10.4 bucket:
//! - `root`: assembled `Config` plus `CliOverrides`
//! - `server`: HTTP control-plane bind settings
//! - `dns`: DNS Server / Upstream Resolver settings
//! - `database`: persistence bootstrap tuning
//! - `blocking`: Decision Engine toggle and rule seeding
//! - `threat`: Threat Ingestor / Reputation Client settings
//! - `firewall`: Firewall Service sync policy
//! - `alerts`: Alert Pipeline dispatch settings
//! - `logging`: tracing-subscriber settings
//! - `errors`: configuration errors

pub mod alerts;
pub mod blocking;
pub mod database;
pub mod dns;
pub mod errors;
pub mod firewall;
pub mod logging;
pub mod root;
pub mod server;
pub mod threat;

pub use alerts::AlertsConfig;
pub use blocking::BlockingConfig;
pub use database::DatabaseConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use firewall::FirewallConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use threat::ThreatConfig;
