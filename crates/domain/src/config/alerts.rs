use serde::{Deserialize, Serialize};

/// Alert Pipeline (C14) dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertsConfig {
    /// Outbound webhook URL. Empty disables the webhook channel.
    #[serde(default)]
    pub webhook_url: String,

    #[serde(default = "default_mass_threshold")]
    pub mass_threshold: usize,

    /// Per-channel severity floor: "info" | "warning" | "critical".
    #[serde(default = "default_min_severity")]
    pub min_severity: String,

    /// Timeout in milliseconds for webhook delivery.
    #[serde(default = "default_webhook_timeout_ms")]
    pub webhook_timeout_ms: u64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            mass_threshold: default_mass_threshold(),
            min_severity: default_min_severity(),
            webhook_timeout_ms: default_webhook_timeout_ms(),
        }
    }
}

fn default_mass_threshold() -> usize {
    10
}

fn default_min_severity() -> String {
    "info".to_string()
}

fn default_webhook_timeout_ms() -> u64 {
    5_000
}
