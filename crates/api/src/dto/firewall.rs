use serde::{Deserialize, Serialize};

use guardian_application::{DailyEventCount, PlatformStatus};
use guardian_domain::{FirewallEvent, FirewallRule};
use guardian_infrastructure::firewall::platform::AdapterDescriptor;

#[derive(Debug, Serialize)]
pub struct FirewallRuleResponse {
    pub id: i64,
    pub rule_type: String,
    pub target: String,
    pub direction: String,
    pub protocol: String,
    pub source: String,
    pub reason: String,
    pub is_active: bool,
    pub created_at: String,
    pub expires_at: Option<String>,
    pub hit_count: u64,
}

impl From<FirewallRule> for FirewallRuleResponse {
    fn from(rule: FirewallRule) -> Self {
        Self {
            id: rule.id,
            rule_type: rule.rule_type.as_str().to_string(),
            target: rule.target.to_string(),
            direction: rule.direction.as_str().to_string(),
            protocol: rule.protocol.as_str().to_string(),
            source: rule.source.as_str().to_string(),
            reason: rule.reason.to_string(),
            is_active: rule.is_active,
            created_at: rule.created_at,
            expires_at: rule.expires_at,
            hit_count: rule.hit_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddFirewallRuleRequest {
    pub rule_type: String,
    pub target: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

fn default_direction() -> String {
    "outbound".to_string()
}

fn default_protocol() -> String {
    "any".to_string()
}

#[derive(Debug, Serialize)]
pub struct AddFirewallRuleResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ToggleFirewallRuleRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct AdapterDescriptorResponse {
    pub platform: String,
    pub display_name: String,
    pub engine: String,
    pub is_current: bool,
    pub required_privilege: String,
    pub minimum_os_version: String,
}

impl From<AdapterDescriptor> for AdapterDescriptorResponse {
    fn from(descriptor: AdapterDescriptor) -> Self {
        Self {
            platform: descriptor.platform.to_string(),
            display_name: descriptor.display_name.to_string(),
            engine: descriptor.engine.to_string(),
            is_current: descriptor.is_current,
            required_privilege: descriptor.required_privilege.to_string(),
            minimum_os_version: descriptor.minimum_os_version.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FirewallStatusResponse {
    pub engine: String,
    pub installed: bool,
    pub active_rule_count: u32,
    pub platform_name: String,
    pub display_name: String,
    pub required_privilege: String,
    pub minimum_os_version: String,
    pub supported_platforms: Vec<AdapterDescriptorResponse>,
}

impl FirewallStatusResponse {
    pub fn new(status: PlatformStatus, supported_platforms: Vec<AdapterDescriptor>) -> Self {
        Self {
            engine: status.engine,
            installed: status.installed,
            active_rule_count: status.active_rule_count,
            platform_name: status.platform_name.to_string(),
            display_name: status.display_name,
            required_privilege: status.required_privilege,
            minimum_os_version: status.minimum_os_version,
            supported_platforms: supported_platforms.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FirewallEventResponse {
    pub id: i64,
    pub rule_id: Option<i64>,
    pub event_type: String,
    pub detail: String,
    pub created_at: String,
}

impl From<FirewallEvent> for FirewallEventResponse {
    fn from(event: FirewallEvent) -> Self {
        Self {
            id: event.id,
            rule_id: event.rule_id,
            event_type: event.event_type.to_string(),
            detail: event.detail.to_string(),
            created_at: event.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailyEventCountResponse {
    pub date: String,
    pub count: u64,
}

impl From<DailyEventCount> for DailyEventCountResponse {
    fn from(entry: DailyEventCount) -> Self {
        Self { date: entry.date, count: entry.count }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncRulesResponse {
    pub rules_inserted: u64,
}

#[derive(Debug, Serialize)]
pub struct FirewallConfigResponse {
    pub threat_score_threshold: f64,
    pub auto_sync_ports: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFirewallConfigRequest {
    pub threat_score_threshold: Option<f64>,
    pub auto_sync_ports: Option<bool>,
}
