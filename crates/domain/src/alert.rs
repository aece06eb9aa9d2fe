//! Alert Pipeline data types (C14). Grounded on
//! `examples/original_source/bigr/alerts/{engine,channels}.py`. See
//! SPEC_FULL.md §3 and §4.14.

use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    NewDevice,
    DeviceMissing,
    PortChange,
    CategoryChange,
    VendorChange,
    HostnameChange,
    MassChange,
    RogueDevice,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::NewDevice => "new_device",
            AlertType::DeviceMissing => "device_missing",
            AlertType::PortChange => "port_change",
            AlertType::CategoryChange => "category_change",
            AlertType::VendorChange => "vendor_change",
            AlertType::HostnameChange => "hostname_change",
            AlertType::MassChange => "mass_change",
            AlertType::RogueDevice => "rogue_device",
        }
    }
}

/// Fixed per-field-change severity table, SPEC_FULL.md §4.14.
pub fn change_severity(change_type: AlertType) -> AlertSeverity {
    match change_type {
        AlertType::PortChange => AlertSeverity::Warning,
        AlertType::CategoryChange | AlertType::VendorChange | AlertType::HostnameChange => {
            AlertSeverity::Info
        }
        _ => AlertSeverity::Info,
    }
}

/// A long-tail detail value: a fixed set of shapes plus a generic key/value
/// map, replacing the distilled source's duck-typed `details` dict
/// (SPEC_FULL.md §9, "Dynamic duck-typed rule objects").
#[derive(Debug, Clone)]
pub enum AlertDetail {
    FieldChange { field: Arc<str>, old_value: Arc<str>, new_value: Arc<str> },
    Count(u64),
    KeyValue(HashMap<String, String>),
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub alert_type: AlertType,
    pub ip: Arc<str>,
    pub mac: Option<Arc<str>>,
    pub message: String,
    pub details: AlertDetail,
    pub timestamp: String,
}

/// An observed network asset at one point in time, used for snapshot diffs.
/// `site_label` is carried opaquely per SPEC_FULL.md §9's open-question
/// resolution and not otherwise interpreted by the alert pipeline.
#[derive(Debug, Clone)]
pub struct Asset {
    pub ip: Arc<str>,
    pub mac: Option<Arc<str>>,
    pub hostname: Option<Arc<str>>,
    pub vendor: Option<Arc<str>>,
    pub category: Option<Arc<str>>,
    pub open_ports: Vec<u16>,
    pub site_label: Option<Arc<str>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedField {
    Port,
    Category,
    Vendor,
    Hostname,
}

#[derive(Debug, Clone)]
pub struct AssetChange {
    pub ip: Arc<str>,
    pub mac: Option<Arc<str>>,
    pub field: ChangedField,
    pub old_value: String,
    pub new_value: String,
}

/// Result of diffing two scan snapshots, consumed by the alert engine.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    pub new_assets: Vec<Asset>,
    pub removed_assets: Vec<Asset>,
    pub changed_assets: Vec<AssetChange>,
}

/// A rogue-device matching condition, SPEC_FULL.md §4.14.
#[derive(Debug, Clone)]
pub struct RogueRule {
    pub ip_prefix: Option<String>,
    pub mac_prefix: Option<String>,
    pub severity: AlertSeverity,
}

impl RogueRule {
    pub fn matches(&self, asset: &Asset) -> bool {
        if let Some(prefix) = &self.ip_prefix {
            if asset.ip.starts_with(prefix.as_str()) {
                return true;
            }
        }
        if let (Some(prefix), Some(mac)) = (&self.mac_prefix, &asset.mac) {
            if mac.starts_with(prefix.as_str()) {
                return true;
            }
        }
        false
    }
}

pub const DEFAULT_MASS_THRESHOLD: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_threshold_boundary() {
        let threshold = DEFAULT_MASS_THRESHOLD;
        assert!(9 < threshold);
        assert!(10 >= threshold);
    }

    #[test]
    fn rogue_rule_matches_ip_prefix() {
        let rule = RogueRule { ip_prefix: Some("10.0.".into()), mac_prefix: None, severity: AlertSeverity::Critical };
        let asset = Asset {
            ip: "10.0.0.5".into(),
            mac: None,
            hostname: None,
            vendor: None,
            category: None,
            open_ports: vec![],
            site_label: None,
        };
        assert!(rule.matches(&asset));
    }
}
