use serde::{Deserialize, Serialize};

use guardian_application::{BlocklistSourcesReport, GuardianStatus, HealthReport};
use guardian_domain::{CustomRule, StatsSummary};

#[derive(Debug, Serialize)]
pub struct GuardianStatusResponse {
    pub cache_entries: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub active_rules: u64,
    pub blocked_domains_indexed: u64,
}

impl From<GuardianStatus> for GuardianStatusResponse {
    fn from(status: GuardianStatus) -> Self {
        Self {
            cache_entries: status.cache.size,
            cache_hits: status.cache.hits,
            cache_misses: status.cache.misses,
            active_rules: status.active_rules,
            blocked_domains_indexed: status.blocked_domains_indexed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub upstream_reachable: bool,
    pub blocklist_loaded: bool,
    pub cache_entries: usize,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            upstream_reachable: report.upstream_reachable,
            blocklist_loaded: report.blocklist_loaded,
            cache_entries: report.cache.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub period_total: u64,
    pub period_blocked: u64,
    pub period_allowed: u64,
    pub period_cache_hits: u64,
    pub lifetime_total: u64,
    pub lifetime_blocked: u64,
    pub lifetime_allowed: u64,
    pub lifetime_cache_hits: u64,
    pub top_blocked: Vec<TopBlockedEntry>,
}

#[derive(Debug, Serialize)]
pub struct TopBlockedEntry {
    pub domain: String,
    pub count: u64,
}

impl From<StatsSummary> for StatsResponse {
    fn from(summary: StatsSummary) -> Self {
        Self {
            period_total: summary.period.total,
            period_blocked: summary.period.blocked,
            period_allowed: summary.period.allowed,
            period_cache_hits: summary.period.cache_hits,
            lifetime_total: summary.lifetime.total,
            lifetime_blocked: summary.lifetime.blocked,
            lifetime_allowed: summary.lifetime.allowed,
            lifetime_cache_hits: summary.lifetime.cache_hits,
            top_blocked: summary
                .top_blocked
                .into_iter()
                .map(|(domain, count)| TopBlockedEntry { domain: domain.to_string(), count })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlocklistSourceResponse {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub format: String,
    pub category: String,
    pub domain_count: u64,
    pub is_enabled: bool,
    pub last_updated: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlocklistSourcesResponse {
    pub sources: Vec<BlocklistSourceResponse>,
    pub union_indexed_count: u64,
}

impl From<BlocklistSourcesReport> for BlocklistSourcesResponse {
    fn from(report: BlocklistSourcesReport) -> Self {
        Self {
            sources: report
                .sources
                .into_iter()
                .map(|s| BlocklistSourceResponse {
                    id: s.id,
                    name: s.name.to_string(),
                    url: s.url.to_string(),
                    format: s.format.as_str().to_string(),
                    category: s.category.to_string(),
                    domain_count: s.domain_count,
                    is_enabled: s.is_enabled,
                    last_updated: s.last_updated,
                })
                .collect(),
            union_indexed_count: report.union_indexed_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlocklistUpdateResponse {
    pub domains_synced: u64,
}

#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub id: i64,
    pub action: String,
    pub domain: String,
    pub category: String,
    pub reason: String,
    pub hit_count: u64,
    pub is_active: bool,
    pub created_at: String,
}

impl From<CustomRule> for RuleResponse {
    fn from(rule: CustomRule) -> Self {
        Self {
            id: rule.id,
            action: rule.action.as_str().to_string(),
            domain: rule.domain.to_string(),
            category: rule.category.to_string(),
            reason: rule.reason.to_string(),
            hit_count: rule.hit_count,
            is_active: rule.is_active,
            created_at: rule.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddRuleRequest {
    pub action: String,
    pub domain: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct AddRuleResponse {
    pub id: i64,
}
