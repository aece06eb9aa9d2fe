pub mod cache;
pub mod resolver;
pub mod server;
pub mod transport;
pub mod wire;

pub use cache::DnsCache;
pub use resolver::DohResolver;
pub use server::DnsServerHandler;
