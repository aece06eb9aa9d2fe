//! Data types owned by the Rules Store (C4). See SPEC_FULL.md §3 and §4.4.

use crate::errors::DomainError;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Allow,
    Block,
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::Allow => "allow",
            RuleAction::Block => "block",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuleAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(RuleAction::Allow),
            "block" => Ok(RuleAction::Block),
            other => Err(DomainError::InvalidAction(other.to_string())),
        }
    }
}

/// A user-authored allow/block rule. Soft-deleted only (`is_active = false`)
/// so that historical statistics keep referencing a stable identity.
#[derive(Debug, Clone)]
pub struct CustomRule {
    pub id: i64,
    pub action: RuleAction,
    pub domain: Arc<str>,
    pub category: Arc<str>,
    pub reason: Arc<str>,
    pub hit_count: u64,
    pub is_active: bool,
    pub created_at: String,
}

/// Outcome of a rules-store exact-match lookup.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub action: RuleAction,
    pub rule_id: i64,
    pub category: Arc<str>,
}
