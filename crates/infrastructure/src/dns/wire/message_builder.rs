use super::record_type_map::RecordTypeMapper;
use guardian_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds standard recursive DNS queries in wire format for the Upstream
/// Resolver (C2) to forward.
pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a query with a random transaction ID and returns both, since
    /// callers match the response ID against it before trusting the answer.
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(domain)
            .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", domain, e)))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(64);
        let mut encoder = BinEncoder::new(&mut buf);
        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::InvalidDomainName(format!("failed to encode query: {}", e)))?;

        Ok((id, buf))
    }
}
