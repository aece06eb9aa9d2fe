//! DNS Server (C6): UDP and TCP listeners plus the wire-level translation of
//! `HandleDnsQueryUseCase` outcomes into on-the-wire responses. See
//! SPEC_FULL.md §4.6. Step 1 (parsing) and the final encode happen here;
//! steps 2-6 (cache, decision, upstream resolve, caching, stats) belong to
//! the use case.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use guardian_application::{HandleDnsQueryUseCase, QueryOutcome};
use guardian_domain::{DnsQuery, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable, BinEncoder};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::wire::{rewrite_transaction_id, RecordTypeMapper};

const MAX_UDP_QUERY_SIZE: usize = 4096;
const TCP_DEADLINE: Duration = Duration::from_secs(5);

/// Parses the wire query, hands it to the use case, and re-serializes
/// whatever `QueryOutcome` comes back. Holds no decision/cache/stats state
/// of its own.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` on parse failure (step 1: drop).
    pub async fn handle_query(&self, query_bytes: &[u8]) -> Option<Vec<u8>> {
        let message = match Message::from_bytes(query_bytes) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "failed to parse DNS query, dropping");
                return None;
            }
        };
        let request_id = message.id();

        let query = message.queries().first()?;
        let name = query.name().clone();
        let domain = name.to_string();

        let Some(record_type) = RecordTypeMapper::from_hickory(query.query_type()) else {
            warn!(domain = %domain, qtype = %query.query_type(), "unsupported record type");
            return Some(Self::servfail_response(request_id));
        };

        let dns_query = DnsQuery::new(domain.clone(), record_type);

        let outcome = self.use_case.execute(&dns_query).await;
        Some(match outcome {
            QueryOutcome::CacheHit { mut wire_bytes } | QueryOutcome::Upstream { mut wire_bytes } => {
                rewrite_transaction_id(&mut wire_bytes, request_id);
                wire_bytes
            }
            QueryOutcome::Sinkhole { ip, ttl } => Self::sinkhole_response(request_id, &name, ip, ttl),
            QueryOutcome::ServFail => {
                error!(domain = %domain, "upstream resolve failed");
                Self::servfail_response(request_id)
            }
        })
    }

    fn sinkhole_response(request_id: u16, name: &Name, ip: std::net::Ipv4Addr, ttl: u32) -> Vec<u8> {
        let mut message = Message::new(request_id, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        let record = Record::from_rdata(name.clone(), ttl, RData::A(A(ip)));
        message.add_answer(record);
        Self::encode(&message)
    }

    fn servfail_response(request_id: u16) -> Vec<u8> {
        let mut message = Message::new(request_id, MessageType::Response, OpCode::Query);
        message.set_response_code(ResponseCode::ServFail);
        Self::encode(&message)
    }

    fn encode(message: &Message) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128);
        let mut encoder = BinEncoder::new(&mut buf);
        if let Err(e) = message.emit(&mut encoder) {
            error!(error = %e, "failed to encode DNS response");
        }
        buf
    }
}

/// Runs the UDP listener until `shutdown` fires. One independent task is
/// spawned per incoming datagram, per §4.6 concurrency model.
pub async fn run_udp(
    handler: Arc<DnsServerHandler>,
    bind_addr: SocketAddr,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    let socket = Socket::new(Domain::for_address(bind_addr), Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| DomainError::InvalidConfig(format!("failed to create UDP socket: {e}")))?;
    let _ = socket.set_reuse_address(true);
    #[cfg(unix)]
    let _ = socket.set_reuse_port(true);
    // Default UDP buffers (~256KB) are undersized for DNS bursts.
    let _ = socket.set_recv_buffer_size(8 * 1024 * 1024);
    let _ = socket.set_send_buffer_size(4 * 1024 * 1024);
    socket
        .bind(&bind_addr.into())
        .map_err(|e| DomainError::InvalidConfig(format!("failed to bind UDP {bind_addr}: {e}")))?;
    socket
        .set_nonblocking(true)
        .map_err(|e| DomainError::InvalidConfig(format!("failed to set UDP socket nonblocking: {e}")))?;

    let std_socket: std::net::UdpSocket = socket.into();
    let udp = UdpSocket::from_std(std_socket)
        .map_err(|e| DomainError::InvalidConfig(format!("failed to adopt UDP socket: {e}")))?;
    let udp = Arc::new(udp);

    info!(bind_address = %bind_addr, "DNS UDP listener ready");

    let mut buf = vec![0u8; MAX_UDP_QUERY_SIZE];
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS UDP listener shutting down");
                return Ok(());
            }
            recv = udp.recv_from(&mut buf) => {
                let (len, peer) = match recv {
                    Ok(v) => v,
                    Err(e) => {
                        warn!(error = %e, "UDP recv error");
                        continue;
                    }
                };
                let query_bytes = buf[..len].to_vec();
                let handler = handler.clone();
                let udp = udp.clone();
                tokio::spawn(async move {
                    if let Some(response) = handler.handle_query(&query_bytes).await {
                        if let Err(e) = udp.send_to(&response, peer).await {
                            warn!(error = %e, %peer, "failed to send UDP response");
                        }
                    }
                });
            }
        }
    }
}

/// Runs the TCP listener until `shutdown` fires. Each connection is served
/// on its own task with a 5s read deadline for both the length prefix and
/// the payload, per §4.6.
pub async fn run_tcp(
    handler: Arc<DnsServerHandler>,
    bind_addr: SocketAddr,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| DomainError::InvalidConfig(format!("failed to bind TCP {bind_addr}: {e}")))?;

    info!(bind_address = %bind_addr, "DNS TCP listener ready");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS TCP listener shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(v) => v,
                    Err(e) => {
                        warn!(error = %e, "TCP accept error");
                        continue;
                    }
                };
                let handler = handler.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve_tcp_connection(&handler, stream).await {
                        debug!(%peer, error = %e, "TCP DNS connection ended");
                    }
                });
            }
        }
    }
}

async fn serve_tcp_connection(handler: &DnsServerHandler, mut stream: TcpStream) -> Result<(), DomainError> {
    let mut len_buf = [0u8; 2];
    tokio::time::timeout(TCP_DEADLINE, stream.read_exact(&mut len_buf))
        .await
        .map_err(|_| DomainError::UpstreamUnavailable("TCP DNS length read deadline exceeded".into()))?
        .map_err(|e| DomainError::UpstreamUnavailable(format!("TCP DNS length read failed: {e}")))?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut payload = vec![0u8; len];
    tokio::time::timeout(TCP_DEADLINE, stream.read_exact(&mut payload))
        .await
        .map_err(|_| DomainError::UpstreamUnavailable("TCP DNS payload read deadline exceeded".into()))?
        .map_err(|e| DomainError::UpstreamUnavailable(format!("TCP DNS payload read failed: {e}")))?;

    let Some(response) = handler.handle_query(&payload).await else {
        return Ok(());
    };

    let response_len = (response.len() as u16).to_be_bytes();
    stream
        .write_all(&response_len)
        .await
        .map_err(|e| DomainError::UpstreamUnavailable(format!("TCP DNS length write failed: {e}")))?;
    stream
        .write_all(&response)
        .await
        .map_err(|e| DomainError::UpstreamUnavailable(format!("TCP DNS payload write failed: {e}")))?;
    Ok(())
}
