use serde::{Deserialize, Serialize};

/// Firewall Service (C12) sync policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirewallConfig {
    /// Minimum threat score for `sync_threat_rules()` to materialise a
    /// `block_ip` rule from a subnet indicator. Default: 0.7.
    #[serde(default = "default_threat_score_threshold")]
    pub threat_score_threshold: f64,

    /// Enable the high-risk-port remediation sync on startup.
    #[serde(default = "default_true")]
    pub auto_sync_ports: bool,
}

fn default_threat_score_threshold() -> f64 {
    0.7
}

fn default_true() -> bool {
    true
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            threat_score_threshold: default_threat_score_threshold(),
            auto_sync_ports: true,
        }
    }
}
