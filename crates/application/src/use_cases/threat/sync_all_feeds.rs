use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, Utc};
use guardian_domain::{threat::calculate_threat_score, validators, DomainError};
use tracing::{info, warn};

use crate::ports::feed_parser_port::FeedParserPort;
use crate::ports::threat_store_port::{SubnetAggregate, ThreatStorePort};
use crate::subnet_hash;

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub subnets_updated: u64,
    pub expired_removed: u64,
}

/// Threat Ingestor `sync_all()` (C10), SPEC_FULL.md §4.10.
pub struct SyncAllFeedsUseCase {
    parsers: Vec<Arc<dyn FeedParserPort>>,
    store: Arc<dyn ThreatStorePort>,
    hmac_key: Option<String>,
    expiry_days: i64,
}

impl SyncAllFeedsUseCase {
    pub fn new(
        parsers: Vec<Arc<dyn FeedParserPort>>,
        store: Arc<dyn ThreatStorePort>,
        hmac_key: Option<String>,
        expiry_days: i64,
    ) -> Self {
        Self { parsers, store, hmac_key, expiry_days }
    }

    pub async fn execute(&self) -> Result<SyncReport, DomainError> {
        for parser in &self.parsers {
            let cfg = parser.feed_config();
            self.store
                .ensure_feed_registered(&cfg.name, &cfg.feed_url, &cfg.feed_type)
                .await?;
        }

        let feeds = self.store.list_feeds().await?;
        let enabled: HashSet<Arc<str>> =
            feeds.iter().filter(|f| f.enabled).map(|f| f.name.clone()).collect();

        let mut aggregates: HashMap<String, SubnetAggregate> = HashMap::new();

        for parser in &self.parsers {
            let cfg = parser.feed_config();
            if !enabled.contains(&cfg.name) {
                continue;
            }

            let indicators = match parser.fetch().await {
                Ok(indicators) => indicators,
                Err(err) => {
                    warn!(feed = %cfg.name, error = %err, "feed fetch failed");
                    continue;
                }
            };

            for indicator in &indicators {
                let subnet = validators::subnet24(indicator.ip);
                let aggregate = aggregates.entry(subnet).or_default();
                aggregate.representative_ip.get_or_insert(indicator.ip);
                aggregate.feeds.insert(cfg.name.clone());
                aggregate.types.insert(indicator.indicator_type.clone());
            }

            self.store.mark_feed_synced(&cfg.name, indicators.len() as u64).await?;
            info!(feed = %cfg.name, indicators = indicators.len(), "feed synced");
        }

        let now = Utc::now();
        let expires_at = (now + Duration::days(self.expiry_days)).to_rfc3339();

        let mut subnets_updated = 0u64;
        for (subnet, aggregate) in &aggregates {
            let subnet_hash = subnet_hash::hash_subnet(self.hmac_key.as_deref(), subnet);
            let subnet_prefix = aggregate
                .representative_ip
                .filter(|ip| validators::is_private_ipv4(*ip))
                .map(|_| subnet.clone());
            let score = calculate_threat_score(
                aggregate.feeds.iter().map(|s| s.as_ref()),
                aggregate.types.iter().map(|t| t.as_ref()),
            );

            self.store
                .upsert_indicator(&subnet_hash, subnet_prefix.as_deref(), aggregate, score, &expires_at)
                .await?;
            subnets_updated += 1;
        }

        let expired_removed = self.store.delete_expired(&now.to_rfc3339()).await?;

        Ok(SyncReport { subnets_updated, expired_removed })
    }
}
