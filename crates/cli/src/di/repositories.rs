use std::sync::Arc;

use guardian_application::ports::{
    AlertStorePort, FirewallRuleStorePort, ReputationClientPort, RulesStorePort, StatsTrackerPort, ThreatStorePort,
};
use guardian_domain::{Config, DomainError};
use guardian_infrastructure::{
    SqliteAlertStore, SqliteBlocklistStore, SqliteFirewallRuleStore, SqliteRulesStore, SqliteStatsTracker,
    SqliteThreatStore,
};
use sqlx::SqlitePool;

/// Persistence adapters for every subsystem, all bound to the write pool
/// except where a repository is read-mostly and shares the read pool too
/// via its own pool handle. The Guardian Daemon process owns both pools and
/// hands out clones freely since `SqlitePool` is itself a connection-pool
/// handle.
pub struct Repositories {
    pub rules: Arc<dyn RulesStorePort>,
    pub blocklist: Arc<SqliteBlocklistStore>,
    pub stats: Arc<dyn StatsTrackerPort>,
    pub threat: Arc<dyn ThreatStorePort>,
    pub firewall: Arc<dyn FirewallRuleStorePort>,
    pub alerts: Arc<dyn AlertStorePort>,
    /// Handle kept around for the reputation client, which does its own
    /// ambient lookup-count tracking against the read pool.
    pub reputation_pool: SqlitePool,
}

impl Repositories {
    pub async fn build(write_pool: SqlitePool, read_pool: SqlitePool, config: &Config) -> Result<Self, DomainError> {
        let rules = Arc::new(SqliteRulesStore::new(write_pool.clone()).await?);
        let blocklist = Arc::new(SqliteBlocklistStore::new(write_pool.clone()));
        blocklist.reload_index().await?;
        let stats = Arc::new(SqliteStatsTracker::new(write_pool.clone()));
        let threat = Arc::new(SqliteThreatStore::new(write_pool.clone()));
        let firewall = Arc::new(SqliteFirewallRuleStore::new(write_pool.clone()));
        let alerts = Arc::new(SqliteAlertStore::new(write_pool));

        seed_custom_rules(&rules, config).await?;

        Ok(Self { rules, blocklist, stats, threat, firewall, alerts, reputation_pool: read_pool })
    }
}

/// First-boot seed: `blocking.custom_blocked`/`custom_allowed` domains are
/// added as custom rules iff not already indexed, so restarts don't pile up
/// duplicate rows for the same domain.
async fn seed_custom_rules(rules: &Arc<SqliteRulesStore>, config: &Config) -> Result<(), DomainError> {
    use guardian_domain::RuleAction;
    use tracing::info;

    for domain in &config.blocking.custom_blocked {
        if rules.check(domain).is_none() {
            rules.add(RuleAction::Block, domain, "custom", "seeded from configuration").await?;
            info!(domain, "seeded custom block rule");
        }
    }
    for domain in &config.blocking.custom_allowed {
        if rules.check(domain).is_none() {
            rules.add(RuleAction::Allow, domain, "custom", "seeded from configuration").await?;
            info!(domain, "seeded custom allow rule");
        }
    }
    Ok(())
}

pub fn reputation_client(
    http_client: reqwest::Client,
    read_pool: SqlitePool,
    config: &Config,
) -> Arc<dyn ReputationClientPort> {
    Arc::new(guardian_infrastructure::AbuseIpDbReputationClient::new(
        http_client,
        read_pool,
        config.threat.abuseipdb_api_key.clone(),
        config.threat.abuseipdb_daily_limit as u64,
    ))
}
