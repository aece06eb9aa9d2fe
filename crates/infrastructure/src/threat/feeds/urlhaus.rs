use async_trait::async_trait;
use guardian_application::ports::feed_parser_port::{FeedConfig, ParsedIndicator};
use guardian_application::ports::FeedParserPort;
use guardian_domain::DomainError;
use serde_json::Value;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::info;

const URLHAUS_RECENT_URL: &str = "https://urlhaus-api.abuse.ch/v1/urls/recent/";

/// Parses abuse.ch URLhaus recent malware-distribution URLs, keeping only
/// entries whose host is a bare IPv4 address. SPEC_FULL.md §4.9.
pub struct UrlhausFeedParser {
    http_client: reqwest::Client,
}

impl UrlhausFeedParser {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn parse(&self, body: &Value) -> Vec<ParsedIndicator> {
        let Some(urls) = body.get("urls").and_then(|u| u.as_array()) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        urls.iter()
            .filter_map(|entry| entry.get("url")?.as_str())
            .filter_map(|url| {
                let host = crate::threat::feeds::threatfox::url_host(url)?;
                let ip: Ipv4Addr = host.parse().ok()?;
                seen.insert(ip).then_some(ParsedIndicator { ip, indicator_type: Arc::from("malware_delivery") })
            })
            .collect()
    }
}

#[async_trait]
impl FeedParserPort for UrlhausFeedParser {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            name: Arc::from("abusech_urlhaus"),
            feed_url: Arc::from(URLHAUS_RECENT_URL),
            feed_type: Arc::from("json_api"),
        }
    }

    async fn fetch(&self) -> Result<Vec<ParsedIndicator>, DomainError> {
        let response = self
            .http_client
            .get(URLHAUS_RECENT_URL)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("fetching urlhaus: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("parsing urlhaus response: {e}")))?;

        let indicators = self.parse(&body);
        info!(count = indicators.len(), "parsed urlhaus indicators");
        Ok(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_ip_hosts_and_dedupes() {
        let parser = UrlhausFeedParser::new(reqwest::Client::new());
        let body = serde_json::json!({
            "urls": [
                {"url": "http://1.2.3.4/payload.exe"},
                {"url": "http://1.2.3.4/other.exe"},
                {"url": "http://malware.example.com/payload.exe"},
            ]
        });
        let indicators = parser.parse(&body);
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].ip, Ipv4Addr::new(1, 2, 3, 4));
    }
}
