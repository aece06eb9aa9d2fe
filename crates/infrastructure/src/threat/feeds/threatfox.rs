use async_trait::async_trait;
use guardian_application::ports::feed_parser_port::{FeedConfig, ParsedIndicator};
use guardian_application::ports::FeedParserPort;
use guardian_domain::DomainError;
use serde_json::Value;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{info, warn};

const THREATFOX_API_URL: &str = "https://threatfox-api.abuse.ch/api/v1/";
const LOOKBACK_DAYS: u32 = 7;

fn map_threat_type(threat_type: &str) -> &'static str {
    match threat_type {
        "botnet_cc" => "botnet_c2",
        "cc" => "malware_c2",
        "payload_delivery" => "malware_delivery",
        _ => "malware_c2",
    }
}

/// Extracts the IPv4 address out of a ThreatFox IOC value, which may be
/// `ip:port`, a bare IP, or a URL. SPEC_FULL.md §4.9.
fn extract_ip(ioc_value: &str, ioc_type: &str) -> Option<Ipv4Addr> {
    let candidate = match ioc_type {
        "ip:port" | "ip_port" => ioc_value.rsplit_once(':').map(|(host, _)| host).unwrap_or(ioc_value),
        "url" => url_host(ioc_value)?,
        _ => ioc_value,
    };
    candidate.parse().ok()
}

pub(crate) fn url_host(url: &str) -> Option<&str> {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let host_port = without_scheme.split(['/', '?', '#']).next()?;
    Some(host_port.split(':').next().unwrap_or(host_port))
}

/// Parses the abuse.ch ThreatFox IOC feed via its POST JSON API.
/// SPEC_FULL.md §4.9.
pub struct ThreatFoxFeedParser {
    http_client: reqwest::Client,
}

impl ThreatFoxFeedParser {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn parse(&self, body: &Value) -> Vec<ParsedIndicator> {
        let Some(iocs) = body.get("data").and_then(|d| d.as_array()) else {
            return Vec::new();
        };

        iocs.iter()
            .filter_map(|ioc| {
                let ioc_type = ioc.get("ioc_type")?.as_str()?;
                let ioc_value = ioc.get("ioc")?.as_str()?;
                let threat_type = ioc.get("threat_type").and_then(|v| v.as_str()).unwrap_or("");
                let ip = extract_ip(ioc_value, ioc_type)?;
                Some(ParsedIndicator { ip, indicator_type: Arc::from(map_threat_type(threat_type)) })
            })
            .collect()
    }
}

#[async_trait]
impl FeedParserPort for ThreatFoxFeedParser {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            name: Arc::from("abusech_threatfox"),
            feed_url: Arc::from(THREATFOX_API_URL),
            feed_type: Arc::from("json_api"),
        }
    }

    async fn fetch(&self) -> Result<Vec<ParsedIndicator>, DomainError> {
        let response = self
            .http_client
            .post(THREATFOX_API_URL)
            .json(&serde_json::json!({ "query": "get_iocs", "days": LOOKBACK_DAYS }))
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("fetching threatfox: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("parsing threatfox response: {e}")))?;

        if body.get("query_status").and_then(|v| v.as_str()) != Some("ok") {
            warn!(status = ?body.get("query_status"), "threatfox query status not ok");
            return Ok(Vec::new());
        }

        let indicators = self.parse(&body);
        info!(count = indicators.len(), "parsed threatfox indicators");
        Ok(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ip_from_ip_port() {
        assert_eq!(extract_ip("1.2.3.4:443", "ip:port"), Some(Ipv4Addr::new(1, 2, 3, 4)));
    }

    #[test]
    fn extracts_ip_from_url() {
        assert_eq!(extract_ip("http://5.6.7.8/payload.exe", "url"), Some(Ipv4Addr::new(5, 6, 7, 8)));
    }

    #[test]
    fn parses_iocs_with_type_mapping() {
        let parser = ThreatFoxFeedParser::new(reqwest::Client::new());
        let body = serde_json::json!({
            "query_status": "ok",
            "data": [
                {"ioc_type": "ip:port", "ioc": "9.9.9.9:8080", "threat_type": "botnet_cc"},
                {"ioc_type": "ip:port", "ioc": "not-an-ip:80", "threat_type": "cc"},
            ]
        });
        let indicators = parser.parse(&body);
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].ip, Ipv4Addr::new(9, 9, 9, 9));
        assert_eq!(indicators[0].indicator_type.as_ref(), "botnet_c2");
    }
}
