use async_trait::async_trait;
use guardian_application::ports::feed_parser_port::{FeedConfig, ParsedIndicator};
use guardian_application::ports::FeedParserPort;
use guardian_domain::DomainError;
use serde_json::Value;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{info, warn};

const OTX_SUBSCRIBED_URL: &str = "https://otx.alienvault.com/api/v1/pulses/subscribed";
const PULSE_LIMIT: u32 = 50;

/// Derives an indicator type from a pulse's free-text tags.
fn classify_pulse(tags: &[&str]) -> &'static str {
    let tags: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let has_any = |set: &[&str]| set.iter().any(|t| tags.contains(*t));

    if has_any(&["c2", "c&c", "command and control", "rat"]) {
        "malware_c2"
    } else if has_any(&["botnet", "ddos"]) {
        "botnet"
    } else if has_any(&["scanner", "scanning", "brute force", "bruteforce"]) {
        "scanner"
    } else if has_any(&["spam", "phishing"]) {
        "spam"
    } else if has_any(&["ransomware", "malware", "trojan"]) {
        "malware_c2"
    } else if has_any(&["apt", "targeted attack"]) {
        "apt"
    } else {
        "malicious"
    }
}

/// Parses AlienVault OTX subscribed-pulse indicators. Skipped gracefully
/// when no API key is configured. SPEC_FULL.md §4.9.
pub struct AlienVaultFeedParser {
    http_client: reqwest::Client,
    api_key: Option<Arc<str>>,
}

impl AlienVaultFeedParser {
    pub fn new(http_client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { http_client, api_key: api_key.map(Arc::from) }
    }

    fn parse(&self, body: &Value) -> Vec<ParsedIndicator> {
        let Some(pulses) = body.get("results").and_then(|v| v.as_array()) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut indicators = Vec::new();
        for pulse in pulses {
            let tags: Vec<&str> = pulse
                .get("tags")
                .and_then(|t| t.as_array())
                .map(|arr| arr.iter().filter_map(|t| t.as_str()).collect())
                .unwrap_or_default();
            let indicator_type = classify_pulse(&tags);

            let Some(pulse_indicators) = pulse.get("indicators").and_then(|v| v.as_array()) else {
                continue;
            };
            for ioc in pulse_indicators {
                if ioc.get("type").and_then(|v| v.as_str()) != Some("IPv4") {
                    continue;
                }
                let Some(value) = ioc.get("indicator").and_then(|v| v.as_str()) else {
                    continue;
                };
                if let Ok(ip) = value.parse::<Ipv4Addr>() {
                    if seen.insert(ip) {
                        indicators.push(ParsedIndicator { ip, indicator_type: Arc::from(indicator_type) });
                    }
                }
            }
        }
        indicators
    }
}

#[async_trait]
impl FeedParserPort for AlienVaultFeedParser {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            name: Arc::from("alienvault_otx"),
            feed_url: Arc::from(OTX_SUBSCRIBED_URL),
            feed_type: Arc::from("json_api"),
        }
    }

    async fn fetch(&self) -> Result<Vec<ParsedIndicator>, DomainError> {
        let Some(api_key) = &self.api_key else {
            info!("OTX API key not configured, skipping AlienVault feed");
            return Ok(Vec::new());
        };

        let response = self
            .http_client
            .get(OTX_SUBSCRIBED_URL)
            .header("X-OTX-API-KEY", api_key.as_ref())
            .query(&[("limit", PULSE_LIMIT.to_string()), ("page", "1".to_string())])
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("fetching OTX pulses: {e}")))?;

        if response.status() == reqwest::StatusCode::FORBIDDEN {
            warn!("OTX API key is invalid or expired");
            return Ok(Vec::new());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("parsing OTX response: {e}")))?;

        let indicators = self.parse(&body);
        info!(count = indicators.len(), "parsed alienvault otx indicators");
        Ok(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_pulse_by_tags() {
        assert_eq!(classify_pulse(&["C2", "rat"]), "malware_c2");
        assert_eq!(classify_pulse(&["ddos"]), "botnet");
        assert_eq!(classify_pulse(&["unrelated"]), "malicious");
    }

    #[test]
    fn parses_only_ipv4_indicators_and_dedupes() {
        let parser = AlienVaultFeedParser::new(reqwest::Client::new(), Some("key".into()));
        let body = serde_json::json!({
            "results": [{
                "tags": ["botnet"],
                "indicators": [
                    {"type": "IPv4", "indicator": "1.1.1.1"},
                    {"type": "IPv4", "indicator": "1.1.1.1"},
                    {"type": "domain", "indicator": "evil.example.com"},
                ]
            }]
        });
        let indicators = parser.parse(&body);
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].indicator_type.as_ref(), "botnet");
    }
}
