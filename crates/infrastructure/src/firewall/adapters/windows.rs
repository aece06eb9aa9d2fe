use async_trait::async_trait;
use guardian_application::ports::{FirewallAdapterPort, PlatformStatus};
use guardian_domain::{DomainError, FirewallRule};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::debug;

const WFP_SUBLAYER_GUID: &str = "{GUARDIAN-WFP-SUBLAYER}";

/// Windows firewall adapter targeting the Windows Filtering Platform.
/// SPEC_FULL.md §4.13. Stub mode always: no WFP filters are installed.
pub struct WindowsFirewallAdapter {
    installed: AtomicBool,
    rule_count: AtomicU32,
}

impl Default for WindowsFirewallAdapter {
    fn default() -> Self {
        Self { installed: AtomicBool::new(false), rule_count: AtomicU32::new(0) }
    }
}

impl WindowsFirewallAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn engine(&self) -> String {
        let suffix = if cfg!(target_os = "windows") { "" } else { "_stub" };
        format!("wfp{suffix}")
    }
}

#[async_trait]
impl FirewallAdapterPort for WindowsFirewallAdapter {
    async fn install(&self) -> Result<(), DomainError> {
        self.installed.store(true, Ordering::SeqCst);
        debug!(sublayer = WFP_SUBLAYER_GUID, "windows firewall adapter installed (stub)");
        Ok(())
    }

    async fn uninstall(&self) -> Result<(), DomainError> {
        self.installed.store(false, Ordering::SeqCst);
        self.rule_count.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn apply_rules(&self, rules: &[FirewallRule]) -> Result<(), DomainError> {
        // Every rule type maps to a WFP filter on the sublayer; domain rules
        // require a DNS-redirect path since WFP filters operate on IP/port.
        self.rule_count.store(rules.len() as u32, Ordering::SeqCst);
        Ok(())
    }

    async fn status(&self) -> Result<PlatformStatus, DomainError> {
        Ok(PlatformStatus {
            engine: self.engine(),
            installed: self.installed.load(Ordering::SeqCst),
            active_rule_count: self.rule_count.load(Ordering::SeqCst),
            platform_name: "windows",
            display_name: "Windows Filtering Platform (WFP)".to_string(),
            required_privilege: "Administrator privileges".to_string(),
            minimum_os_version: "Windows Vista / Server 2008+".to_string(),
        })
    }

    fn platform_name(&self) -> &'static str {
        "windows"
    }
}
