use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::Transport;
use dnsperf_domain::DomainError;
use hickory_proto::rr::RecordType;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// One answered query against one server.
pub struct ExchangeResult {
    pub response: DnsResponse,
    pub server_addr: SocketAddr,
    /// Time on the wire: the UDP exchange, plus the TCP exchange when the
    /// UDP answer was truncated. Socket setup is excluded.
    pub round_trip: Duration,
    pub protocol_used: &'static str,
}

/// Sends a single-question query to `server_addr` over UDP and retries over
/// TCP when the answer comes back truncated.
///
/// UDP datagrams carrying another ID are discarded while waiting; a TCP
/// answer with the wrong ID is an error.
pub async fn query_server(
    server_addr: SocketAddr,
    name: &str,
    record_type: RecordType,
    recursion_desired: bool,
    timeout: Duration,
) -> Result<ExchangeResult, DomainError> {
    let query = MessageBuilder::build_query(name, record_type, recursion_desired)?;

    let start = Instant::now();
    let udp_response = Transport::udp(server_addr)
        .send(&query.bytes, timeout)
        .await?;

    let response = ResponseParser::parse_for(query.id, &udp_response.bytes)?;

    if !response.truncated {
        return Ok(ExchangeResult {
            response,
            server_addr,
            round_trip: udp_response.round_trip,
            protocol_used: udp_response.protocol_used,
        });
    }

    debug!(
        server = %server_addr,
        name = %name,
        "Response truncated (TC bit), retrying via TCP"
    );

    let remaining = timeout
        .checked_sub(start.elapsed())
        .unwrap_or(Duration::from_millis(500));

    let tcp_response = Transport::tcp(server_addr)
        .send(&query.bytes, remaining)
        .await?;
    let response = ResponseParser::parse_for(query.id, &tcp_response.bytes)?;

    Ok(ExchangeResult {
        response,
        server_addr,
        round_trip: udp_response.round_trip + tcp_response.round_trip,
        protocol_used: tcp_response.protocol_used,
    })
}
