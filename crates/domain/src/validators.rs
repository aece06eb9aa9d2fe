//! Shared normalisation and validation helpers used across blocklist, rules
//! and decision-engine lookups so that trailing dots and case never change a
//! decision or a cache key (see SPEC_FULL.md §8, "Normalisation").

use std::net::Ipv4Addr;

/// Domain names that must never appear as blocked, regardless of source
/// content (SPEC_FULL.md GLOSSARY, "Never-block set").
pub const NEVER_BLOCK: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
];

/// Hosts-format sink addresses accepted as the first whitespace-separated
/// field when parsing `hosts` formatted blocklists.
pub const HOSTS_SINK_ADDRESSES: &[&str] = &["0.0.0.0", "127.0.0.1"];

/// Lowercase and strip a single trailing dot, matching FQDN normalisation.
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.to_ascii_lowercase()
}

pub fn is_never_block(domain: &str) -> bool {
    NEVER_BLOCK.contains(&domain)
}

/// Strip the leftmost label of a domain, e.g. `a.b.c` -> `b.c`. Returns
/// `None` once no further labels remain, so callers can walk parents.
pub fn strip_leftmost_label(domain: &str) -> Option<&str> {
    domain.split_once('.').map(|(_, rest)| rest)
}

pub fn is_valid_ipv4(raw: &str) -> bool {
    raw.parse::<Ipv4Addr>().is_ok()
}

/// RFC 1918 / RFC 6598 (CGNAT) private ranges, per SPEC_FULL.md GLOSSARY.
pub fn is_private_ipv4(addr: Ipv4Addr) -> bool {
    let octets = addr.octets();
    match octets {
        [10, ..] => true,
        [172, b, ..] if (16..=31).contains(&b) => true,
        [192, 168, ..] => true,
        [100, b, ..] if (64..=127).contains(&b) => true,
        _ => false,
    }
}

/// The `/24` network address string for an IPv4 address, e.g.
/// `192.168.1.42` -> `"192.168.1.0/24"`.
pub fn subnet24(addr: Ipv4Addr) -> String {
    let o = addr.octets();
    format!("{}.{}.{}.0/24", o[0], o[1], o[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_trailing_dot() {
        assert_eq!(normalize_domain("Evil.COM."), "evil.com");
        assert_eq!(normalize_domain("evil.com"), "evil.com");
    }

    #[test]
    fn parent_walk_terminates() {
        let mut cur = "deep.sub.evil.com";
        let mut labels = vec![cur];
        while let Some(rest) = strip_leftmost_label(cur) {
            labels.push(rest);
            cur = rest;
        }
        assert_eq!(labels, vec!["deep.sub.evil.com", "sub.evil.com", "evil.com", "com"]);
    }

    #[test]
    fn private_ranges() {
        assert!(is_private_ipv4("10.0.0.5".parse().unwrap()));
        assert!(is_private_ipv4("172.16.4.4".parse().unwrap()));
        assert!(is_private_ipv4("192.168.1.1".parse().unwrap()));
        assert!(is_private_ipv4("100.64.0.1".parse().unwrap()));
        assert!(!is_private_ipv4("8.8.8.8".parse().unwrap()));
    }

    #[test]
    fn subnet_truncates_to_slash24() {
        assert_eq!(subnet24("198.51.100.42".parse().unwrap()), "198.51.100.0/24");
    }
}
