use async_trait::async_trait;
use guardian_application::ports::{FirewallAdapterPort, PlatformStatus};
use guardian_domain::{DomainError, FirewallRule, FirewallRuleType, Protocol};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::debug;

const NFT_TABLE: &str = "inet guardian_filter";
const IPT_CHAIN: &str = "GUARDIAN_FILTER";

/// Linux firewall adapter targeting nftables (falls back conceptually to
/// an iptables chain when `nft` is unavailable). SPEC_FULL.md §4.13.
///
/// Runs in stub mode always: no `nft`/`iptables` process is ever spawned,
/// matching the distilled source's cross-platform-safe stub behaviour.
pub struct LinuxFirewallAdapter {
    installed: AtomicBool,
    rule_count: AtomicU32,
}

impl Default for LinuxFirewallAdapter {
    fn default() -> Self {
        Self { installed: AtomicBool::new(false), rule_count: AtomicU32::new(0) }
    }
}

impl LinuxFirewallAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn engine(&self) -> String {
        let suffix = if cfg!(target_os = "linux") { "" } else { "_stub" };
        format!("nftables{suffix}")
    }

    /// Renders the nft command batch that would be applied, for logging.
    /// `block_domain`/`allow_domain` have no native nftables primitive and
    /// are marked as requiring a DNS-redirect path.
    fn render_commands(rules: &[FirewallRule]) -> Vec<String> {
        let mut commands = vec![
            format!("nft flush chain {NFT_TABLE} output"),
            format!("nft flush chain {NFT_TABLE} input"),
        ];

        for rule in rules {
            match rule.rule_type {
                FirewallRuleType::BlockIp => {
                    commands.push(format!("nft add rule {NFT_TABLE} output ip daddr {} drop", rule.target));
                }
                FirewallRuleType::BlockPort => {
                    let proto = if matches!(rule.protocol, Protocol::Any) { "tcp" } else { rule.protocol.as_str() };
                    commands.push(format!("nft add rule {NFT_TABLE} output {proto} dport {} drop", rule.target));
                }
                FirewallRuleType::AllowIp => {
                    commands.push(format!("nft add rule {NFT_TABLE} output ip daddr {} accept", rule.target));
                }
                FirewallRuleType::BlockDomain => {
                    commands.push(format!("# domain '{}' requires DNS-redirect path; no native nft primitive", rule.target));
                    commands.push(format!("nft add rule {NFT_TABLE} output ip daddr @guardian_dns_set drop"));
                }
                FirewallRuleType::AllowDomain => {
                    commands.push(format!("# domain '{}' requires DNS-redirect path; no native nft primitive", rule.target));
                    commands.push(format!("nft add rule {NFT_TABLE} output ip daddr @guardian_dns_allow_set accept"));
                }
            }
        }

        commands
    }
}

#[async_trait]
impl FirewallAdapterPort for LinuxFirewallAdapter {
    async fn install(&self) -> Result<(), DomainError> {
        self.installed.store(true, Ordering::SeqCst);
        debug!(table = NFT_TABLE, "linux firewall adapter installed (stub)");
        Ok(())
    }

    async fn uninstall(&self) -> Result<(), DomainError> {
        self.installed.store(false, Ordering::SeqCst);
        self.rule_count.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn apply_rules(&self, rules: &[FirewallRule]) -> Result<(), DomainError> {
        let commands = Self::render_commands(rules);
        debug!(count = commands.len(), "rendered nft command batch");
        self.rule_count.store(rules.len() as u32, Ordering::SeqCst);
        Ok(())
    }

    async fn status(&self) -> Result<PlatformStatus, DomainError> {
        Ok(PlatformStatus {
            engine: self.engine(),
            installed: self.installed.load(Ordering::SeqCst),
            active_rule_count: self.rule_count.load(Ordering::SeqCst),
            platform_name: "linux",
            display_name: "Linux nftables / iptables".to_string(),
            required_privilege: "Root privileges (CAP_NET_ADMIN)".to_string(),
            minimum_os_version: format!("Linux 3.13+ (nftables) or any kernel ({IPT_CHAIN} iptables fallback)"),
        })
    }

    fn platform_name(&self) -> &'static str {
        "linux"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_domain::{Direction, RuleSource};
    use std::sync::Arc;

    fn rule(rule_type: FirewallRuleType, target: &str) -> FirewallRule {
        FirewallRule {
            id: 1,
            rule_type,
            target: Arc::from(target),
            direction: Direction::Outbound,
            protocol: Protocol::Any,
            source: RuleSource::User,
            reason: Arc::from(""),
            is_active: true,
            created_at: String::new(),
            expires_at: None,
            hit_count: 0,
        }
    }

    #[tokio::test]
    async fn apply_rules_tracks_count_and_flags_domain_rules() {
        let adapter = LinuxFirewallAdapter::new();
        let rules = vec![rule(FirewallRuleType::BlockIp, "1.2.3.4"), rule(FirewallRuleType::BlockDomain, "evil.example.com")];
        adapter.apply_rules(&rules).await.unwrap();
        let status = adapter.status().await.unwrap();
        assert_eq!(status.active_rule_count, 2);

        let commands = LinuxFirewallAdapter::render_commands(&rules);
        assert!(commands.iter().any(|c| c.contains("DNS-redirect")));
    }
}
