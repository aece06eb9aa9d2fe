use std::net::SocketAddr;
use std::sync::Arc;

use guardian_infrastructure::DnsServerHandler;
use guardian_infrastructure::dns::server::{run_tcp, run_udp};
use tokio_util::sync::CancellationToken;

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let udp = tokio::spawn(run_udp(handler.clone(), bind_addr, shutdown.clone()));
    let tcp = tokio::spawn(run_tcp(handler, bind_addr, shutdown));

    let (udp_result, tcp_result) = tokio::join!(udp, tcp);
    udp_result??;
    tcp_result??;
    Ok(())
}
