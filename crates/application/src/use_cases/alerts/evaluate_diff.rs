use chrono::Utc;
use guardian_domain::alert::{change_severity, AlertDetail, AlertType, ChangedField, RogueRule};
use guardian_domain::{Alert, AlertSeverity, Asset, DiffResult};

/// Alert Pipeline diff-to-alert classification (C14), SPEC_FULL.md §4.14.
/// Pure transformation: a snapshot `DiffResult` plus the configured rogue
/// rules become the set of alerts a dispatch pass will fan out.
pub struct EvaluateDiffUseCase {
    rogue_rules: Vec<RogueRule>,
    mass_threshold: usize,
}

impl EvaluateDiffUseCase {
    pub fn new(rogue_rules: Vec<RogueRule>, mass_threshold: usize) -> Self {
        Self { rogue_rules, mass_threshold }
    }

    pub fn execute(&self, diff: &DiffResult) -> Vec<Alert> {
        let now = Utc::now().to_rfc3339();
        let mut alerts = Vec::new();

        let new_count = diff.new_assets.len();
        if new_count >= self.mass_threshold {
            alerts.push(Alert {
                severity: AlertSeverity::Critical,
                alert_type: AlertType::MassChange,
                ip: "*".into(),
                mac: None,
                message: format!("{new_count} new devices seen in one scan"),
                details: AlertDetail::Count(new_count as u64),
                timestamp: now.clone(),
            });
        }

        for asset in &diff.new_assets {
            if let Some(rule) = self.rogue_rules.iter().find(|r| r.matches(asset)) {
                alerts.push(self.rogue_alert(asset, rule.severity, &now));
            } else {
                alerts.push(Alert {
                    severity: AlertSeverity::Warning,
                    alert_type: AlertType::NewDevice,
                    ip: asset.ip.clone(),
                    mac: asset.mac.clone(),
                    message: format!("new device seen: {}", asset.ip),
                    details: AlertDetail::KeyValue(Default::default()),
                    timestamp: now.clone(),
                });
            }
        }

        for asset in &diff.removed_assets {
            alerts.push(Alert {
                severity: AlertSeverity::Info,
                alert_type: AlertType::DeviceMissing,
                ip: asset.ip.clone(),
                mac: asset.mac.clone(),
                message: format!("device no longer responding: {}", asset.ip),
                details: AlertDetail::KeyValue(Default::default()),
                timestamp: now.clone(),
            });
        }

        for change in &diff.changed_assets {
            let alert_type = match change.field {
                ChangedField::Port => AlertType::PortChange,
                ChangedField::Category => AlertType::CategoryChange,
                ChangedField::Vendor => AlertType::VendorChange,
                ChangedField::Hostname => AlertType::HostnameChange,
            };
            alerts.push(Alert {
                severity: change_severity(alert_type),
                alert_type,
                ip: change.ip.clone(),
                mac: change.mac.clone(),
                message: format!(
                    "{} changed on {}: {} -> {}",
                    field_label(change.field),
                    change.ip,
                    change.old_value,
                    change.new_value
                ),
                details: AlertDetail::FieldChange {
                    field: field_label(change.field).into(),
                    old_value: change.old_value.clone().into(),
                    new_value: change.new_value.clone().into(),
                },
                timestamp: now.clone(),
            });
        }

        alerts
    }

    fn rogue_alert(&self, asset: &Asset, severity: AlertSeverity, now: &str) -> Alert {
        Alert {
            severity,
            alert_type: AlertType::RogueDevice,
            ip: asset.ip.clone(),
            mac: asset.mac.clone(),
            message: format!("rogue device matched configured rule: {}", asset.ip),
            details: AlertDetail::KeyValue(Default::default()),
            timestamp: now.to_string(),
        }
    }
}

fn field_label(field: ChangedField) -> &'static str {
    match field {
        ChangedField::Port => "open_ports",
        ChangedField::Category => "category",
        ChangedField::Vendor => "vendor",
        ChangedField::Hostname => "hostname",
    }
}
