pub mod check_reputation;
pub mod get_threat_stats;
pub mod list_feeds;
pub mod lookup_indicator;
pub mod sync_all_feeds;
pub mod sync_single_feed;

pub use check_reputation::CheckReputationUseCase;
pub use get_threat_stats::GetThreatStatsUseCase;
pub use list_feeds::ListThreatFeedsUseCase;
pub use lookup_indicator::LookupIndicatorUseCase;
pub use sync_all_feeds::{SyncAllFeedsUseCase, SyncReport};
pub use sync_single_feed::SyncSingleFeedUseCase;
