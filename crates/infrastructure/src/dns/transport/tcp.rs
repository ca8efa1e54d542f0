use super::{timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsperf_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::debug;

/// DNS over TCP transport (RFC 1035 §4.2.2 two-byte length framing).
///
/// Used when a UDP answer comes back truncated.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    /// Connect time counts toward the round trip: it is part of dispatch.
    async fn exchange(&self, message_bytes: &[u8]) -> Result<(Vec<u8>, Duration), DomainError> {
        let io_err = |what: &str, e: std::io::Error| {
            DomainError::IoError(format!("TCP {} {} failed: {}", what, self.server_addr, e))
        };

        let len = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::InvalidDnsResponse("DNS message too large for TCP framing".to_string())
        })?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&len.to_be_bytes());
        framed.extend_from_slice(message_bytes);

        let start = Instant::now();
        let mut stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| io_err("connect to", e))?;

        stream
            .write_all(&framed)
            .await
            .map_err(|e| io_err("write to", e))?;

        let mut len_buf = [0u8; 2];
        stream
            .read_exact(&mut len_buf)
            .await
            .map_err(|e| io_err("read from", e))?;
        let response_len = u16::from_be_bytes(len_buf) as usize;

        let mut response = vec![0u8; response_len];
        stream
            .read_exact(&mut response)
            .await
            .map_err(|e| io_err("read from", e))?;
        let round_trip = start.elapsed();

        debug!(
            server = %self.server_addr,
            bytes_received = response_len,
            round_trip_us = round_trip.as_micros() as u64,
            "TCP response received"
        );

        Ok((response, round_trip))
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let (bytes, round_trip) = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(timeout_error)??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
            round_trip,
        })
    }
}
