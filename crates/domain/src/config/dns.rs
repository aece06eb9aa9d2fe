use serde::{Deserialize, Serialize};

/// DNS Server (C6) and Upstream Resolver (C2) configuration. Field set
/// follows the configuration table in SPEC_FULL.md §6.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default = "default_dns_host")]
    pub host: String,

    #[serde(default = "default_dns_port")]
    pub port: u16,

    #[serde(default = "default_upstream_doh")]
    pub upstream_doh: String,

    #[serde(default = "default_upstream_fallback")]
    pub upstream_fallback: String,

    #[serde(default = "default_sinkhole_ip")]
    pub sinkhole_ip: String,

    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u32,

    #[serde(default = "default_resolve_timeout_ms")]
    pub resolve_timeout_ms: u64,

    #[serde(default = "default_blocklist_update_hours")]
    pub blocklist_update_hours: u64,
}

fn default_dns_host() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_upstream_doh() -> String {
    "https://cloudflare-dns.com/dns-query".to_string()
}

fn default_upstream_fallback() -> String {
    "1.1.1.1".to_string()
}

fn default_sinkhole_ip() -> String {
    "0.0.0.0".to_string()
}

fn default_cache_size() -> usize {
    200_000
}

fn default_cache_ttl() -> u32 {
    300
}

fn default_resolve_timeout_ms() -> u64 {
    2000
}

fn default_blocklist_update_hours() -> u64 {
    24
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            host: default_dns_host(),
            port: default_dns_port(),
            upstream_doh: default_upstream_doh(),
            upstream_fallback: default_upstream_fallback(),
            sinkhole_ip: default_sinkhole_ip(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl(),
            resolve_timeout_ms: default_resolve_timeout_ms(),
            blocklist_update_hours: default_blocklist_update_hours(),
        }
    }
}
