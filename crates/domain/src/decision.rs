//! Decision Engine (C5) output types. The engine itself is a pure function
//! living in `guardian-application`; this module holds the vocabulary it
//! returns so every layer agrees on it. See SPEC_FULL.md §4.5.

use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    CustomAllow,
    CustomBlock,
    Blocklist,
    DefaultAllow,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::CustomAllow => "custom_allow",
            DecisionReason::CustomBlock => "custom_block",
            DecisionReason::Blocklist => "blocklist",
            DecisionReason::DefaultAllow => "default_allow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Block,
    /// Upstream resolution failed (SERVFAIL). Counted in `total` only, not
    /// `allowed` or `blocked`.
    Error,
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub verdict: Verdict,
    pub reason: DecisionReason,
    /// Populated when a rule matched; `None` for blocklist/default outcomes.
    pub matched_rule_id: Option<i64>,
}

impl Decision {
    pub fn allow(reason: DecisionReason, matched_rule_id: Option<i64>) -> Self {
        Self { verdict: Verdict::Allow, reason, matched_rule_id }
    }

    pub fn block(reason: DecisionReason, matched_rule_id: Option<i64>) -> Self {
        Self { verdict: Verdict::Block, reason, matched_rule_id }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.verdict, Verdict::Block)
    }
}

pub const DEFAULT_SINKHOLE: Ipv4Addr = Ipv4Addr::new(0, 0, 0, 0);
pub const SINKHOLE_TTL_SECS: u32 = 300;
