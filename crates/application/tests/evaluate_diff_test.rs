use guardian_application::use_cases::alerts::EvaluateDiffUseCase;
use guardian_domain::{AlertSeverity, AlertType, Asset, DiffResult};

fn asset(ip: &str) -> Asset {
    Asset {
        ip: ip.into(),
        mac: None,
        hostname: None,
        vendor: None,
        category: None,
        open_ports: vec![],
        site_label: None,
    }
}

#[test]
fn mass_change_gates_on_new_assets_only() {
    let use_case = EvaluateDiffUseCase::new(Vec::new(), 10);

    // 10 removed, 0 new: must NOT trigger mass_change even though the total
    // changed-asset count would cross the threshold.
    let diff = DiffResult {
        new_assets: vec![],
        removed_assets: (0..10).map(|i| asset(&format!("10.0.0.{i}"))).collect(),
        changed_assets: vec![],
    };
    let alerts = use_case.execute(&diff);
    assert!(!alerts.iter().any(|a| a.alert_type == AlertType::MassChange));
}

#[test]
fn mass_change_fires_when_new_assets_meet_threshold() {
    let use_case = EvaluateDiffUseCase::new(Vec::new(), 10);

    let diff = DiffResult {
        new_assets: (0..10).map(|i| asset(&format!("10.0.0.{i}"))).collect(),
        removed_assets: vec![],
        changed_assets: vec![],
    };
    let alerts = use_case.execute(&diff);

    let mass_change = alerts.iter().find(|a| a.alert_type == AlertType::MassChange).expect("mass_change alert");
    assert_eq!(mass_change.severity, AlertSeverity::Critical);

    // Still one new_device alert per new asset.
    assert_eq!(alerts.iter().filter(|a| a.alert_type == AlertType::NewDevice).count(), 10);
}

#[test]
fn new_device_alerts_are_warning_severity() {
    let use_case = EvaluateDiffUseCase::new(Vec::new(), 10);

    let diff = DiffResult { new_assets: vec![asset("192.168.1.50")], removed_assets: vec![], changed_assets: vec![] };
    let alerts = use_case.execute(&diff);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, AlertType::NewDevice);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
}
