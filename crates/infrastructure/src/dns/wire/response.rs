use guardian_domain::DomainError;
use hickory_proto::op::Message;
use hickory_proto::rr::RData;
use hickory_proto::serialize::binary::BinDecodable;

/// Default TTL applied when an upstream response carries no usable TTL —
/// an empty answer section with no SOA in authority (rare, but seen from
/// misbehaving forwarders).
const FALLBACK_TTL_SECS: u32 = 30;

/// Extracts the cache lifetime for a raw wire-format DNS response: the
/// minimum TTL across its answer records, or the SOA minimum from the
/// authority section for negative responses, per §4.6 step 6.
pub fn min_ttl(response_bytes: &[u8]) -> Result<u32, DomainError> {
    let message = Message::from_bytes(response_bytes)
        .map_err(|e| DomainError::InvalidDomainName(format!("failed to parse response: {}", e)))?;

    let answer_min = message
        .answers()
        .iter()
        .map(|r| r.ttl())
        .min();

    if let Some(ttl) = answer_min {
        return Ok(ttl);
    }

    let soa_min = message.name_servers().iter().find_map(|r| match r.data() {
        RData::SOA(soa) => Some(soa.minimum().min(r.ttl())),
        _ => None,
    });

    Ok(soa_min.unwrap_or(FALLBACK_TTL_SECS))
}

/// Overwrites the transaction ID (first two bytes) of a wire-format DNS
/// message in place, per §4.6 steps 3 and 6: cached/upstream answers are
/// replayed under the requesting client's own query ID.
pub fn rewrite_transaction_id(message_bytes: &mut [u8], id: u16) {
    if message_bytes.len() >= 2 {
        let [hi, lo] = id.to_be_bytes();
        message_bytes[0] = hi;
        message_bytes[1] = lo;
    }
}
