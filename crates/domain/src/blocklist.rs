//! Data types owned by the Blocklist Store (C3). See SPEC_FULL.md §3 and §4.3.

use std::sync::Arc;

/// Wire format of a downloaded blocklist source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlocklistFormat {
    /// `0.0.0.0 domain` per line.
    Hosts,
    /// Bare domain per line.
    Domains,
}

impl BlocklistFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlocklistFormat::Hosts => "hosts",
            BlocklistFormat::Domains => "domains",
        }
    }
}

impl std::str::FromStr for BlocklistFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hosts" => Ok(BlocklistFormat::Hosts),
            "domains" => Ok(BlocklistFormat::Domains),
            other => Err(format!("unknown blocklist format: {other}")),
        }
    }
}

/// A registered, downloadable blocklist source.
#[derive(Debug, Clone)]
pub struct BlocklistSource {
    pub id: i64,
    pub name: Arc<str>,
    pub url: Arc<str>,
    pub format: BlocklistFormat,
    pub category: Arc<str>,
    pub domain_count: u64,
    pub is_enabled: bool,
    pub last_updated: Option<String>,
    pub etag: Option<String>,
}

/// A single blocked domain entry, owned by one `BlocklistSource`.
#[derive(Debug, Clone)]
pub struct BlockedDomain {
    pub domain: Arc<str>,
    pub blocklist_id: i64,
    pub category: Arc<str>,
}

/// Name-based and domain-substring keyword tables used to derive a category
/// when a source doesn't declare one outright (SPEC_FULL.md §4.3, "Category
/// derivation during ingest").
pub const NAME_CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("ads", "advertising"),
    ("advert", "advertising"),
    ("analytics", "analytics"),
    ("track", "analytics"),
    ("malware", "malware"),
    ("phish", "phishing"),
    ("social", "social"),
    ("porn", "adult"),
    ("adult", "adult"),
];

pub const DOMAIN_CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("doubleclick", "advertising"),
    ("googlesyndication", "advertising"),
    ("analytics", "analytics"),
    ("telemetry", "analytics"),
    ("facebook", "social"),
];

/// Derive a category label for a source/domain pair: try source-name
/// keywords first, then domain-substring keywords, then fall back to the
/// source's declared category (SPEC_FULL.md §4.3).
pub fn derive_category_owned(source_name: &str, domain: &str, declared: &str) -> String {
    let source_lower = source_name.to_ascii_lowercase();
    for (needle, category) in NAME_CATEGORY_KEYWORDS {
        if source_lower.contains(needle) {
            return (*category).to_string();
        }
    }
    for (needle, category) in DOMAIN_CATEGORY_KEYWORDS {
        if domain.contains(needle) {
            return (*category).to_string();
        }
    }
    declared.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_keyword_wins_over_domain_keyword() {
        assert_eq!(
            derive_category_owned("EasyList Ads", "example.com", "general"),
            "advertising"
        );
    }

    #[test]
    fn domain_keyword_used_when_source_unmatched() {
        assert_eq!(
            derive_category_owned("misc-list", "ads.doubleclick.net", "general"),
            "advertising"
        );
    }

    #[test]
    fn falls_back_to_declared_category() {
        assert_eq!(
            derive_category_owned("misc-list", "example.com", "general"),
            "general"
        );
    }
}
