use super::exchange::{query_server, ExchangeResult};
use super::forwarding::ResponseParser;
use async_trait::async_trait;
use dnsperf_application::ports::LatencyProbe;
use dnsperf_domain::{DomainError, Latency, Nameserver, ProbeOutcome};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Times A queries sent straight to an authoritative nameserver.
pub struct AuthoritativeProbe {
    port: u16,
    timeout: Duration,
    recursion_desired: bool,
    require_answer: bool,
}

impl AuthoritativeProbe {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            recursion_desired: false,
            require_answer: false,
        }
    }

    pub fn with_recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.recursion_desired = recursion_desired;
        self
    }

    pub fn with_require_answer(mut self, require_answer: bool) -> Self {
        self.require_answer = require_answer;
        self
    }
}

#[async_trait]
impl LatencyProbe for AuthoritativeProbe {
    async fn measure(
        &self,
        nameserver: &Nameserver,
        query_name: &str,
    ) -> Result<ProbeOutcome, DomainError> {
        let resolver = PinnedResolver::new(self, nameserver);
        resolver.measure(query_name).await
    }
}

/// Resolver bound to one nameserver's addresses for a single probe.
///
/// Holds no cache; dropped as soon as the probe returns.
struct PinnedResolver<'a> {
    probe: &'a AuthoritativeProbe,
    hostname: &'a str,
    targets: Vec<SocketAddr>,
}

impl<'a> PinnedResolver<'a> {
    fn new(probe: &'a AuthoritativeProbe, nameserver: &'a Nameserver) -> Self {
        let mut targets: Vec<SocketAddr> = nameserver
            .addresses
            .iter()
            .map(|ip| SocketAddr::new(*ip, probe.port))
            .collect();
        fastrand::shuffle(&mut targets);

        Self {
            probe,
            hostname: &nameserver.hostname,
            targets,
        }
    }

    async fn measure(&self, query_name: &str) -> Result<ProbeOutcome, DomainError> {
        let mut last_error = None;

        for &target in &self.targets {
            let attempt = query_server(
                target,
                query_name,
                RecordType::A,
                self.probe.recursion_desired,
                self.probe.timeout,
            )
            .await
            .and_then(|result| self.accept(result));

            match attempt {
                Ok(outcome) => return Ok(outcome),
                Err(e) => {
                    debug!(
                        nameserver = %self.hostname,
                        address = %target,
                        error = %e,
                        "Probe attempt failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::NoResponse(format!("{} has no addresses", self.hostname))
        }))
    }

    fn accept(&self, result: ExchangeResult) -> Result<ProbeOutcome, DomainError> {
        let ExchangeResult {
            response,
            server_addr,
            round_trip,
            protocol_used,
        } = result;

        let note = match response.rcode {
            ResponseCode::NoError => None,
            ResponseCode::NXDomain => Some(format!(
                "rcode={}",
                ResponseParser::rcode_to_status(response.rcode)
            )),
            other => {
                return Err(DomainError::NoResponse(format!(
                    "{} answered {}",
                    server_addr,
                    ResponseParser::rcode_to_status(other)
                )))
            }
        };

        if self.probe.require_answer && response.addresses.is_empty() {
            return Err(DomainError::NoResponse(format!(
                "{} returned no A record",
                server_addr
            )));
        }

        let latency = Latency::from_duration(round_trip)?;
        debug!(
            nameserver = %self.hostname,
            address = %server_addr,
            protocol = protocol_used,
            latency_us = latency.as_micros(),
            "Probe answered"
        );
        Ok(ProbeOutcome {
            latency,
            responder: Some(server_addr.ip()),
            note,
        })
    }
}
