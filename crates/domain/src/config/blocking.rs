use serde::{Deserialize, Serialize};

/// Decision Engine (C5) toggle plus seed data for the Rules Store (C4).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Master toggle: when false the decision engine allows every query
    /// regardless of blocklist or rule state.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Domains seeded as custom block rules on first boot.
    #[serde(default)]
    pub custom_blocked: Vec<String>,

    /// Domains seeded as custom allow rules on first boot.
    #[serde(default)]
    pub custom_allowed: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            custom_blocked: vec![],
            custom_allowed: vec![],
        }
    }
}
