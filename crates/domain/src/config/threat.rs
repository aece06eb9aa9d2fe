use serde::{Deserialize, Serialize};

/// Threat Intelligence Ingestor (C9/C10) and Reputation Client (C11) config.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThreatConfig {
    /// Secret for HMAC-SHA256 subnet hashing. Absence falls back to a
    /// deterministic derived key so the ingestor still runs in dev.
    #[serde(default)]
    pub hmac_key: Option<String>,

    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,

    #[serde(default)]
    pub otx_api_key: Option<String>,

    #[serde(default)]
    pub abuseipdb_api_key: Option<String>,

    #[serde(default = "default_abuseipdb_daily_limit")]
    pub abuseipdb_daily_limit: u32,

    /// TTL in seconds for cached reputation lookups.
    #[serde(default = "default_reputation_cache_ttl_secs")]
    pub reputation_cache_ttl_secs: u64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            hmac_key: None,
            expiry_days: default_expiry_days(),
            otx_api_key: None,
            abuseipdb_api_key: None,
            abuseipdb_daily_limit: default_abuseipdb_daily_limit(),
            reputation_cache_ttl_secs: default_reputation_cache_ttl_secs(),
        }
    }
}

fn default_expiry_days() -> i64 {
    90
}

fn default_abuseipdb_daily_limit() -> u32 {
    1_000
}

fn default_reputation_cache_ttl_secs() -> u64 {
    86_400
}
