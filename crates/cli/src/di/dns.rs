use std::sync::Arc;

use guardian_infrastructure::DnsServerHandler;

use super::use_cases::UseCases;

/// Wires the DNS Server (C6) transport handler to the query-orchestration
/// use case, the last step before `server::dns` can bind sockets.
pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn build(use_cases: &UseCases) -> Self {
        Self { handler: Arc::new(DnsServerHandler::new(use_cases.handle_dns_query.clone())) }
    }
}
