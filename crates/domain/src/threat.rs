//! Threat Intelligence data types (C9/C10/C11). See SPEC_FULL.md §3, §4.9–4.11.

use std::collections::BTreeSet;
use std::sync::Arc;

/// A registered feed parser.
#[derive(Debug, Clone)]
pub struct ThreatFeed {
    pub id: i64,
    pub name: Arc<str>,
    pub feed_url: Arc<str>,
    pub feed_type: Arc<str>,
    pub enabled: bool,
    pub last_synced_at: Option<String>,
    pub entries_count: u64,
}

/// A single indicator emitted by a feed parser before aggregation.
#[derive(Debug, Clone)]
pub struct FeedIndicator {
    pub ip: std::net::Ipv4Addr,
    pub indicator_type: Arc<str>,
    pub source_feed: Arc<str>,
}

/// A /24-subnet threat aggregate, identity = HMAC-SHA256 hash of the subnet
/// string (see `guardian_domain::validators::subnet24`).
#[derive(Debug, Clone)]
pub struct ThreatIndicator {
    pub subnet_hash: Arc<str>,
    /// Only populated for private/CGNAT subnets (SPEC_FULL.md §8, "Privacy").
    pub subnet_prefix: Option<Arc<str>>,
    pub threat_score: f64,
    pub source_feeds: BTreeSet<Arc<str>>,
    pub indicator_types: BTreeSet<Arc<str>>,
    pub cve_refs: Vec<Arc<str>>,
    pub first_seen: String,
    pub last_seen: String,
    pub report_count: u64,
    pub expires_at: String,
}

/// Feed reliability weights, SPEC_FULL.md §4.10 — compile-time constants.
pub const FEED_WEIGHTS: &[(&str, f64)] = &[
    ("firehol_level1", 0.90),
    ("firehol_level2", 0.70),
    ("firehol_level3", 0.50),
    ("abusech_threatfox", 0.85),
    ("abusech_urlhaus", 0.80),
    ("alienvault_otx", 0.75),
    ("cins_army", 0.70),
];

/// Indicator type severity weights, SPEC_FULL.md §4.10.
pub const TYPE_WEIGHTS: &[(&str, f64)] = &[
    ("malware_c2", 0.95),
    ("apt", 0.95),
    ("botnet_c2", 0.90),
    ("botnet", 0.85),
    ("malware_delivery", 0.80),
    ("malicious", 0.70),
    ("scanner", 0.50),
    ("suspicious", 0.40),
    ("spam", 0.30),
];

pub const DEFAULT_FEED_WEIGHT: f64 = 0.5;
pub const DEFAULT_TYPE_WEIGHT: f64 = 0.5;
pub const DEFAULT_EXPIRY_DAYS: i64 = 90;

/// Deterministic weighted scoring function, ported verbatim from the
/// distilled source's `_calculate_threat_score` (SPEC_FULL.md §4.10).
pub fn calculate_threat_score<'a>(
    sources: impl IntoIterator<Item = &'a str>,
    types: impl IntoIterator<Item = &'a str>,
) -> f64 {
    let sources: Vec<&str> = sources.into_iter().collect();
    let types: Vec<&str> = types.into_iter().collect();

    if sources.is_empty() && types.is_empty() {
        return 0.0;
    }

    let weight_of_feed = |name: &str| -> f64 {
        FEED_WEIGHTS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, w)| *w)
            .unwrap_or(DEFAULT_FEED_WEIGHT)
    };
    let weight_of_type = |name: &str| -> f64 {
        TYPE_WEIGHTS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, w)| *w)
            .unwrap_or(DEFAULT_TYPE_WEIGHT)
    };

    let avg_feed_score = if sources.is_empty() {
        DEFAULT_FEED_WEIGHT
    } else {
        sources.iter().map(|s| weight_of_feed(s)).sum::<f64>() / sources.len() as f64
    };

    let max_type_score = types
        .iter()
        .map(|t| weight_of_type(t))
        .fold(f64::NEG_INFINITY, f64::max);
    let max_type_score = if types.is_empty() { DEFAULT_TYPE_WEIGHT } else { max_type_score };

    let unique_sources: BTreeSet<&str> = sources.iter().copied().collect();
    let diversity_bonus = (unique_sources.len() as f64 * 0.05).min(0.15);

    let raw = avg_feed_score * 0.40 + max_type_score * 0.45 + diversity_bonus;
    (raw.clamp(0.0, 1.0) * 10000.0).round() / 10000.0
}

/// A normalised reputation-client lookup result (C11).
#[derive(Debug, Clone)]
pub struct ReputationRecord {
    pub ip: std::net::Ipv4Addr,
    /// Provider confidence scaled into [0, 1].
    pub score: f64,
    pub raw_confidence: u8,
    pub total_reports: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_single_feed_ingest() {
        // SPEC_FULL.md §8 scenario 4, first half.
        let score = calculate_threat_score(["firehol_level1"], ["malicious"]);
        // feed weight 0.9, type weight 0.7, diversity 0.05
        assert!((score - 0.725).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn scenario_merge_ingest() {
        // SPEC_FULL.md §8 scenario 4, second half: feeds now {X=0.9-ish,
        // Y=0.7-ish} average 0.8, max type weight from {malicious=0.7,
        // scanner=0.5} is 0.7, diversity bonus for 2 feeds = 0.10.
        let score = calculate_threat_score(
            ["firehol_level1", "cins_army"],
            ["malicious", "scanner"],
        );
        assert!((score - 0.735).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn unknown_feed_and_type_fall_back_to_defaults() {
        let score = calculate_threat_score(["unknown_feed"], ["unknown_type"]);
        // 0.5*0.40 + 0.5*0.45 + 0.05 = 0.475
        assert!((score - 0.475).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn score_is_clamped_and_never_exceeds_one() {
        let score = calculate_threat_score(
            ["firehol_level1", "abusech_threatfox", "abusech_urlhaus", "alienvault_otx"],
            ["apt"],
        );
        assert!(score <= 1.0);
    }
}
