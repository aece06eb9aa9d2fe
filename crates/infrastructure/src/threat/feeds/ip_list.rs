use async_trait::async_trait;
use guardian_application::ports::feed_parser_port::{FeedConfig, ParsedIndicator};
use guardian_application::ports::FeedParserPort;
use guardian_domain::DomainError;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Caps CIDR expansion for /25-/32 ranges so one feed entry can't blow up
/// memory; ported from the distilled source's per-feed expansion limit.
const MAX_EXPANDED_INDICATORS: usize = 500_000;

/// Parses a plain-text IP/CIDR list: one entry per line, `#`-prefixed
/// comments skipped. Covers the FireHOL netsets and the CINS Army list.
/// SPEC_FULL.md §4.9.
pub struct IpListFeedParser {
    http_client: reqwest::Client,
    name: Arc<str>,
    feed_url: Arc<str>,
    indicator_type: Arc<str>,
}

impl IpListFeedParser {
    pub fn new(http_client: reqwest::Client, name: &str, feed_url: &str, indicator_type: &str) -> Self {
        Self {
            http_client,
            name: Arc::from(name),
            feed_url: Arc::from(feed_url),
            indicator_type: Arc::from(indicator_type),
        }
    }

    fn parse(&self, body: &str) -> Vec<ParsedIndicator> {
        let mut indicators = Vec::new();

        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((network, prefix_len)) = parse_cidr(line) {
                if prefix_len <= 24 {
                    indicators.push(self.indicator(network));
                } else {
                    for host in hosts_in_subnet(network, prefix_len) {
                        indicators.push(self.indicator(host));
                        if indicators.len() > MAX_EXPANDED_INDICATORS {
                            return indicators;
                        }
                    }
                }
            } else if let Ok(ip) = line.parse::<Ipv4Addr>() {
                indicators.push(self.indicator(ip));
            }
        }

        indicators
    }

    fn indicator(&self, ip: Ipv4Addr) -> ParsedIndicator {
        ParsedIndicator { ip, indicator_type: self.indicator_type.clone() }
    }
}

fn parse_cidr(s: &str) -> Option<(Ipv4Addr, u32)> {
    let (addr_part, prefix_part) = s.split_once('/')?;
    let addr: Ipv4Addr = addr_part.parse().ok()?;
    let prefix_len: u32 = prefix_part.parse().ok()?;
    if prefix_len > 32 {
        return None;
    }
    let mask = if prefix_len == 0 { 0 } else { u32::MAX << (32 - prefix_len) };
    let network = u32::from(addr) & mask;
    Some((Ipv4Addr::from(network), prefix_len))
}

/// Enumerates host addresses in a subnet narrower than /24, excluding the
/// network and broadcast addresses (mirrors `ipaddress.hosts()`).
fn hosts_in_subnet(network: Ipv4Addr, prefix_len: u32) -> Vec<Ipv4Addr> {
    if prefix_len >= 31 {
        return vec![network];
    }
    let host_bits = 32 - prefix_len;
    let count = 1u32 << host_bits;
    let base = u32::from(network);
    (1..count - 1).map(|offset| Ipv4Addr::from(base + offset)).collect()
}

#[async_trait]
impl FeedParserPort for IpListFeedParser {
    fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            name: self.name.clone(),
            feed_url: self.feed_url.clone(),
            feed_type: Arc::from("ip_list"),
        }
    }

    async fn fetch(&self) -> Result<Vec<ParsedIndicator>, DomainError> {
        let body = self
            .http_client
            .get(self.feed_url.as_ref())
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("fetching {}: {}", self.feed_url, e)))?
            .text()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("reading {}: {}", self.feed_url, e)))?;

        Ok(self.parse(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> IpListFeedParser {
        IpListFeedParser::new(reqwest::Client::new(), "firehol_level1", "https://example/list", "malicious")
    }

    #[test]
    fn parses_plain_ips_and_skips_comments() {
        let body = "# header\n1.2.3.4\n\n5.6.7.8\n";
        let indicators = parser().parse(body);
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators[0].ip, Ipv4Addr::new(1, 2, 3, 4));
    }

    #[test]
    fn large_cidr_records_network_address_only() {
        let indicators = parser().parse("10.0.0.0/16\n");
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].ip, Ipv4Addr::new(10, 0, 0, 0));
    }

    #[test]
    fn small_cidr_expands_excluding_network_and_broadcast() {
        let indicators = parser().parse("192.0.2.0/30\n");
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators[0].ip, Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(indicators[1].ip, Ipv4Addr::new(192, 0, 2, 2));
    }
}
