//! Firewall Control Plane data types (C12/C13). Grounded on
//! `examples/original_source/bigr/firewall/models.py`. See SPEC_FULL.md §3
//! and §4.12–4.13.

use crate::errors::DomainError;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallRuleType {
    BlockIp,
    BlockPort,
    BlockDomain,
    AllowIp,
    AllowDomain,
}

impl FirewallRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirewallRuleType::BlockIp => "block_ip",
            FirewallRuleType::BlockPort => "block_port",
            FirewallRuleType::BlockDomain => "block_domain",
            FirewallRuleType::AllowIp => "allow_ip",
            FirewallRuleType::AllowDomain => "allow_domain",
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, FirewallRuleType::BlockIp | FirewallRuleType::BlockPort | FirewallRuleType::BlockDomain)
    }
}

impl fmt::Display for FirewallRuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FirewallRuleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block_ip" => Ok(FirewallRuleType::BlockIp),
            "block_port" => Ok(FirewallRuleType::BlockPort),
            "block_domain" => Ok(FirewallRuleType::BlockDomain),
            "allow_ip" => Ok(FirewallRuleType::AllowIp),
            "allow_domain" => Ok(FirewallRuleType::AllowDomain),
            other => Err(DomainError::InvalidRuleType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
    Both,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
            Direction::Both => "both",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Direction::Inbound),
            "outbound" => Ok(Direction::Outbound),
            "both" => Ok(Direction::Both),
            other => Err(DomainError::InvalidRuleType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Any,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Any => "any",
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "any" => Ok(Protocol::Any),
            other => Err(DomainError::InvalidRuleType(other.to_string())),
        }
    }
}

/// Rule provenance, matching the distilled source's `source` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    ThreatIntel,
    Remediation,
    User,
}

impl RuleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSource::ThreatIntel => "threat_intel",
            RuleSource::Remediation => "remediation",
            RuleSource::User => "user",
        }
    }
}

impl std::str::FromStr for RuleSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "threat_intel" => Ok(RuleSource::ThreatIntel),
            "remediation" => Ok(RuleSource::Remediation),
            "user" => Ok(RuleSource::User),
            other => Err(DomainError::InvalidRuleType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FirewallRule {
    pub id: i64,
    pub rule_type: FirewallRuleType,
    pub target: Arc<str>,
    pub direction: Direction,
    pub protocol: Protocol,
    pub source: RuleSource,
    pub reason: Arc<str>,
    pub is_active: bool,
    pub created_at: String,
    pub expires_at: Option<String>,
    pub hit_count: u64,
}

/// High-risk remediation ports, SPEC_FULL.md §4.12.
pub const HIGH_RISK_PORTS: &[(u16, Protocol, &str)] = &[
    (135, Protocol::Tcp, "msrpc"),
    (137, Protocol::Udp, "netbios-ns"),
    (139, Protocol::Tcp, "netbios-ssn"),
    (445, Protocol::Tcp, "smb"),
    (1433, Protocol::Tcp, "mssql"),
    (3389, Protocol::Tcp, "rdp"),
    (5900, Protocol::Tcp, "vnc"),
    (6379, Protocol::Tcp, "redis"),
    (9200, Protocol::Tcp, "elasticsearch"),
    (23, Protocol::Tcp, "telnet"),
];

/// A firewall-relevant audit event, persisted to `firewall_events`.
#[derive(Debug, Clone)]
pub struct FirewallEvent {
    pub id: i64,
    pub rule_id: Option<i64>,
    pub event_type: Arc<str>,
    pub detail: Arc<str>,
    pub created_at: String,
}
