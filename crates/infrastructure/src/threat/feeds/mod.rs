pub mod alienvault;
pub mod ip_list;
pub mod threatfox;
pub mod urlhaus;

pub use alienvault::AlienVaultFeedParser;
pub use ip_list::IpListFeedParser;
pub use threatfox::ThreatFoxFeedParser;
pub use urlhaus::UrlhausFeedParser;
