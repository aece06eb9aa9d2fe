use super::adapters::{LinuxFirewallAdapter, MacOsFirewallAdapter, WindowsFirewallAdapter};
use guardian_application::ports::FirewallAdapterPort;
use std::sync::Arc;

/// Descriptive metadata for one supported platform, independent of which
/// adapter is actually live on this host. SPEC_FULL.md §10.7.
#[derive(Debug, Clone)]
pub struct AdapterDescriptor {
    pub platform: &'static str,
    pub display_name: &'static str,
    pub engine: &'static str,
    pub is_current: bool,
    pub required_privilege: &'static str,
    pub minimum_os_version: &'static str,
}

/// Detects the host OS at compile time, mirroring the distilled source's
/// `platform.system()` dispatch.
pub fn detect_platform() -> &'static str {
    if cfg!(target_os = "linux") {
        "linux"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "macos"
    } else {
        "unknown"
    }
}

/// Returns the live adapter for the host platform (or `None` on an
/// unsupported OS).
pub fn current_adapter() -> Option<Arc<dyn FirewallAdapterPort>> {
    match detect_platform() {
        "linux" => Some(Arc::new(LinuxFirewallAdapter::new())),
        "windows" => Some(Arc::new(WindowsFirewallAdapter::new())),
        "macos" => Some(Arc::new(MacOsFirewallAdapter::new())),
        _ => None,
    }
}

/// Metadata for every supported platform, for dashboard/admin introspection.
pub fn all_adapters() -> Vec<AdapterDescriptor> {
    let current = detect_platform();
    vec![
        AdapterDescriptor {
            platform: "linux",
            display_name: "Linux nftables / iptables",
            engine: "nftables",
            is_current: current == "linux",
            required_privilege: "Root privileges (CAP_NET_ADMIN)",
            minimum_os_version: "Linux 3.13+ (nftables) or any kernel (iptables)",
        },
        AdapterDescriptor {
            platform: "windows",
            display_name: "Windows Filtering Platform (WFP)",
            engine: "wfp",
            is_current: current == "windows",
            required_privilege: "Administrator privileges",
            minimum_os_version: "Windows Vista / Server 2008+",
        },
        AdapterDescriptor {
            platform: "macos",
            display_name: "macOS NEFilterDataProvider",
            engine: "ne_filter",
            is_current: current == "macos",
            required_privilege: "Apple Developer entitlement (com.apple.developer.networking.networkextension)",
            minimum_os_version: "macOS 10.15+ (Catalina)",
        },
    ]
}
