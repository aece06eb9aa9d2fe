use serde::{Deserialize, Serialize};

/// Logging configuration (SPEC_FULL.md §10.2).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `RUST_LOG`-style filter directive (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `human` or `json`; selects the tracing-subscriber formatter.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}
