use async_trait::async_trait;
use guardian_application::ports::{FirewallAdapterPort, PlatformStatus};
use guardian_domain::{DomainError, FirewallRule};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::debug;

const NE_FILTER_BUNDLE_ID: &str = "com.guardian.neFilter";

/// macOS firewall adapter targeting a Network Extension filter data
/// provider. SPEC_FULL.md §4.13. Stub mode always: no system extension is
/// loaded.
pub struct MacOsFirewallAdapter {
    installed: AtomicBool,
    rule_count: AtomicU32,
}

impl Default for MacOsFirewallAdapter {
    fn default() -> Self {
        Self { installed: AtomicBool::new(false), rule_count: AtomicU32::new(0) }
    }
}

impl MacOsFirewallAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn engine(&self) -> String {
        let suffix = if cfg!(target_os = "macos") { "" } else { "_stub" };
        format!("ne_filter{suffix}")
    }
}

#[async_trait]
impl FirewallAdapterPort for MacOsFirewallAdapter {
    async fn install(&self) -> Result<(), DomainError> {
        self.installed.store(true, Ordering::SeqCst);
        debug!(bundle_id = NE_FILTER_BUNDLE_ID, "macos firewall adapter installed (stub)");
        Ok(())
    }

    async fn uninstall(&self) -> Result<(), DomainError> {
        self.installed.store(false, Ordering::SeqCst);
        self.rule_count.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn apply_rules(&self, rules: &[FirewallRule]) -> Result<(), DomainError> {
        self.rule_count.store(rules.len() as u32, Ordering::SeqCst);
        Ok(())
    }

    async fn status(&self) -> Result<PlatformStatus, DomainError> {
        Ok(PlatformStatus {
            engine: self.engine(),
            installed: self.installed.load(Ordering::SeqCst),
            active_rule_count: self.rule_count.load(Ordering::SeqCst),
            platform_name: "macos",
            display_name: "macOS NEFilterDataProvider".to_string(),
            required_privilege: "Apple Developer entitlement (com.apple.developer.networking.networkextension)".to_string(),
            minimum_os_version: "macOS 10.15+ (Catalina)".to_string(),
        })
    }

    fn platform_name(&self) -> &'static str {
        "macos"
    }
}
