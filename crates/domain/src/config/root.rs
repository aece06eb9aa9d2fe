use serde::{Deserialize, Serialize};
use std::fs;

use super::alerts::AlertsConfig;
use super::blocking::BlockingConfig;
use super::database::DatabaseConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::firewall::FirewallConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::threat::ThreatConfig;

/// Root configuration, assembled from an optional TOML file, environment
/// variables (SPEC_FULL.md §6), and CLI overrides, in that order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dns: DnsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub blocking: BlockingConfig,
    #[serde(default)]
    pub threat: ThreatConfig,
    #[serde(default)]
    pub firewall: FirewallConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CLI-flag overrides layered on top of file + environment configuration,
/// per the existing `CliOverrides` pattern.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.to_string(),
                    source,
                })?
            }
            None => Config::default(),
        };

        config.apply_env();
        config.apply_overrides(overrides);
        Ok(config)
    }

    fn apply_env(&mut self) {
        use std::env;

        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("GUARDIAN_DNS_HOST") {
            self.dns.host = v;
        }
        if let Ok(v) = env::var("GUARDIAN_DNS_PORT") {
            if let Ok(port) = v.parse() {
                self.dns.port = port;
            }
        }
        if let Ok(v) = env::var("GUARDIAN_UPSTREAM_DOH") {
            self.dns.upstream_doh = v;
        }
        if let Ok(v) = env::var("GUARDIAN_UPSTREAM_FALLBACK") {
            self.dns.upstream_fallback = v;
        }
        if let Ok(v) = env::var("GUARDIAN_CACHE_SIZE") {
            if let Ok(size) = v.parse() {
                self.dns.cache_size = size;
            }
        }
        if let Ok(v) = env::var("GUARDIAN_CACHE_TTL") {
            if let Ok(ttl) = v.parse() {
                self.dns.cache_ttl_secs = ttl;
            }
        }
        if let Ok(v) = env::var("GUARDIAN_SINKHOLE_IP") {
            self.dns.sinkhole_ip = v;
        }
        if let Ok(v) = env::var("GUARDIAN_BLOCKLIST_UPDATE_HOURS") {
            if let Ok(hours) = v.parse() {
                self.dns.blocklist_update_hours = hours;
            }
        }
        if let Ok(v) = env::var("THREAT_HMAC_KEY") {
            self.threat.hmac_key = Some(v);
        }
        if let Ok(v) = env::var("THREAT_EXPIRY_DAYS") {
            if let Ok(days) = v.parse() {
                self.threat.expiry_days = days;
            }
        }
        if let Ok(v) = env::var("OTX_API_KEY") {
            self.threat.otx_api_key = Some(v);
        }
        if let Ok(v) = env::var("ABUSEIPDB_API_KEY") {
            self.threat.abuseipdb_api_key = Some(v);
        }
        if let Ok(v) = env::var("ABUSEIPDB_DAILY_LIMIT") {
            if let Ok(limit) = v.parse() {
                self.threat.abuseipdb_daily_limit = limit;
            }
        }
        if let Ok(v) = env::var("ALERT_WEBHOOK_URL") {
            self.alerts.webhook_url = v;
        }
        if let Ok(v) = env::var("GUARDIAN_LOG_FORMAT") {
            self.logging.format = v;
        }
        if let Ok(v) = env::var("RUST_LOG") {
            self.logging.level = v;
        }
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.port == 0 {
            return Err(ConfigError::Invalid("dns.port must be non-zero".into()));
        }
        if self.server.web_port == 0 {
            return Err(ConfigError::Invalid("server.web_port must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.firewall.threat_score_threshold) {
            return Err(ConfigError::Invalid(
                "firewall.threat_score_threshold must be in [0.0, 1.0]".into(),
            ));
        }
        if self.alerts.mass_threshold == 0 {
            return Err(ConfigError::Invalid("alerts.mass_threshold must be non-zero".into()));
        }
        Ok(())
    }
}
