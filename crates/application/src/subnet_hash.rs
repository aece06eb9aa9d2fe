use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Deterministic derived key used when no operator secret is configured, so
/// the ingestor still runs in development (SPEC_FULL.md §6,
/// `THREAT_HMAC_KEY`).
const FALLBACK_KEY: &[u8] = b"guardian-threat-ingestor-fallback-hmac-key";

/// Hex-encoded HMAC-SHA256(secret, "A.B.C.0/24") — the persistent identity of
/// a threat indicator (SPEC_FULL.md GLOSSARY, "Subnet hash").
pub fn hash_subnet(secret: Option<&str>, subnet: &str) -> String {
    let key: &[u8] = secret.map(str::as_bytes).unwrap_or(FALLBACK_KEY);
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(subnet.as_bytes());
    let result = mac.finalize().into_bytes();
    result.iter().map(|b| format!("{b:02x}")).collect()
}
