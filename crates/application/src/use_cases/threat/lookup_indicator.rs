use std::net::Ipv4Addr;
use std::sync::Arc;

use chrono::Utc;
use guardian_domain::{validators, DomainError, ThreatIndicator};

use crate::ports::threat_store_port::ThreatStorePort;
use crate::subnet_hash;

/// Threat Ingestor `lookup(ip)` (C10), SPEC_FULL.md §4.10.
pub struct LookupIndicatorUseCase {
    store: Arc<dyn ThreatStorePort>,
    hmac_key: Option<String>,
}

impl LookupIndicatorUseCase {
    pub fn new(store: Arc<dyn ThreatStorePort>, hmac_key: Option<String>) -> Self {
        Self { store, hmac_key }
    }

    pub async fn execute(&self, ip: Ipv4Addr) -> Result<Option<ThreatIndicator>, DomainError> {
        let subnet = validators::subnet24(ip);
        let hash = subnet_hash::hash_subnet(self.hmac_key.as_deref(), &subnet);

        let Some(indicator) = self.store.get_indicator(&hash).await? else {
            return Ok(None);
        };

        let expires_at = chrono::DateTime::parse_from_rfc3339(&indicator.expires_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        if expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(indicator))
    }
}
