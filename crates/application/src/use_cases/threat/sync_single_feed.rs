use std::sync::Arc;

use chrono::{Duration, Utc};
use guardian_domain::{threat::calculate_threat_score, validators, DomainError};

use crate::ports::feed_parser_port::FeedParserPort;
use crate::ports::threat_store_port::{SubnetAggregate, ThreatStorePort};
use crate::subnet_hash;

/// Single-feed sync for `POST /api/threat/feeds/{name}/sync` (SPEC_FULL.md
/// §6), reusing the same aggregation-and-scoring algorithm as `sync_all()`
/// over one parser's output.
pub struct SyncSingleFeedUseCase {
    store: Arc<dyn ThreatStorePort>,
    hmac_key: Option<String>,
    expiry_days: i64,
}

impl SyncSingleFeedUseCase {
    pub fn new(store: Arc<dyn ThreatStorePort>, hmac_key: Option<String>, expiry_days: i64) -> Self {
        Self { store, hmac_key, expiry_days }
    }

    pub async fn execute(&self, parser: &Arc<dyn FeedParserPort>) -> Result<u64, DomainError> {
        let cfg = parser.feed_config();
        self.store
            .ensure_feed_registered(&cfg.name, &cfg.feed_url, &cfg.feed_type)
            .await?;

        let indicators = parser.fetch().await?;
        let mut aggregates: std::collections::HashMap<String, SubnetAggregate> =
            std::collections::HashMap::new();

        for indicator in &indicators {
            let subnet = validators::subnet24(indicator.ip);
            let aggregate = aggregates.entry(subnet).or_default();
            aggregate.representative_ip.get_or_insert(indicator.ip);
            aggregate.feeds.insert(cfg.name.clone());
            aggregate.types.insert(indicator.indicator_type.clone());
        }

        let now = Utc::now();
        let expires_at = (now + Duration::days(self.expiry_days)).to_rfc3339();

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
        }

        self.store.mark_feed_synced(&cfg.name, indicators.len() as u64).await?;
        Ok(indicators.len() as u64)
    }
}
