//! Wire-format DNS codec: query construction and response TTL extraction,
//! shared by the Upstream Resolver (C2) and DNS Server (C6).

pub mod message_builder;
pub mod record_type_map;
pub mod response;

pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use response::{min_ttl, rewrite_transaction_id};
