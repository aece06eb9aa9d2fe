use serde::Serialize;

use guardian_application::{SyncReport, ThreatStatsSummary};
use guardian_domain::{ThreatFeed, ThreatIndicator};

#[derive(Debug, Serialize)]
pub struct ThreatFeedResponse {
    pub id: i64,
    pub name: String,
    pub feed_url: String,
    pub feed_type: String,
    pub enabled: bool,
    pub last_synced_at: Option<String>,
    pub entries_count: u64,
}

impl From<ThreatFeed> for ThreatFeedResponse {
    fn from(feed: ThreatFeed) -> Self {
        Self {
            id: feed.id,
            name: feed.name.to_string(),
            feed_url: feed.feed_url.to_string(),
            feed_type: feed.feed_type.to_string(),
            enabled: feed.enabled,
            last_synced_at: feed.last_synced_at,
            entries_count: feed.entries_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThreatStatsResponse {
    pub total_active_indicators: u64,
    pub total_feeds: u64,
    pub enabled_feeds: u64,
    pub mean_active_score: f64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl From<ThreatStatsSummary> for ThreatStatsResponse {
    fn from(summary: ThreatStatsSummary) -> Self {
        Self {
            total_active_indicators: summary.total_active_indicators,
            total_feeds: summary.total_feeds,
            enabled_feeds: summary.enabled_feeds,
            mean_active_score: summary.mean_active_score,
            high: summary.high,
            medium: summary.medium,
            low: summary.low,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThreatIndicatorResponse {
    pub subnet_hash: String,
    pub subnet_prefix: Option<String>,
    pub threat_score: f64,
    pub source_feeds: Vec<String>,
    pub indicator_types: Vec<String>,
    pub first_seen: String,
    pub last_seen: String,
    pub report_count: u64,
    pub expires_at: String,
}

impl From<ThreatIndicator> for ThreatIndicatorResponse {
    fn from(indicator: ThreatIndicator) -> Self {
        Self {
            subnet_hash: indicator.subnet_hash.to_string(),
            subnet_prefix: indicator.subnet_prefix.map(|p| p.to_string()),
            threat_score: indicator.threat_score,
            source_feeds: indicator.source_feeds.into_iter().map(|s| s.to_string()).collect(),
            indicator_types: indicator.indicator_types.into_iter().map(|t| t.to_string()).collect(),
            first_seen: indicator.first_seen,
            last_seen: indicator.last_seen,
            report_count: indicator.report_count,
            expires_at: indicator.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncAllFeedsResponse {
    pub subnets_updated: u64,
    pub expired_removed: u64,
}

impl From<SyncReport> for SyncAllFeedsResponse {
    fn from(report: SyncReport) -> Self {
        Self { subnets_updated: report.subnets_updated, expired_removed: report.expired_removed }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncSingleFeedResponse {
    pub indicators_fetched: u64,
}
