use async_trait::async_trait;
use guardian_domain::{DomainError, FirewallRule};

/// Live status of the platform firewall adapter (C13), SPEC_FULL.md §4.13.
#[derive(Debug, Clone)]
pub struct PlatformStatus {
    pub engine: String,
    pub installed: bool,
    pub active_rule_count: u32,
    pub platform_name: &'static str,
    /// Human display name, required privilege, minimum OS version — the
    /// descriptive metadata supplemented per SPEC_FULL.md §10.7.
    pub display_name: String,
    pub required_privilege: String,
    pub minimum_os_version: String,
}

/// Application-facing port for a single Firewall Adapter (C13): one
/// implementation per host OS, each honouring this uniform interface.
/// Adapters must never touch rules outside their own managed namespace.
#[async_trait]
pub trait FirewallAdapterPort: Send + Sync {
    async fn install(&self) -> Result<(), DomainError>;

    async fn uninstall(&self) -> Result<(), DomainError>;

    /// Atomically replaces the adapter's managed rule set with `rules`.
    async fn apply_rules(&self, rules: &[FirewallRule]) -> Result<(), DomainError>;

    async fn status(&self) -> Result<PlatformStatus, DomainError>;

    fn platform_name(&self) -> &'static str;
}
