use dnsperf_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, RData};
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// A/AAAA addresses from the answer section.
    pub addresses: Vec<IpAddr>,

    /// NS targets from the answer section, in the order received.
    pub nameservers: Vec<Name>,

    /// A/AAAA records from the additional section (glue), keyed by owner.
    pub glue: Vec<(Name, IpAddr)>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }

    /// Glue addresses for one nameserver name.
    pub fn glue_for(&self, name: &Name) -> Vec<IpAddr> {
        self.glue
            .iter()
            .filter(|(owner, _)| owner == name)
            .map(|(_, ip)| *ip)
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut addresses = Vec::with_capacity(message.answers().len().min(8));
        let mut nameservers = Vec::new();

        for record in message.answers() {
            match record.data() {
                RData::A(a) => addresses.push(IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => addresses.push(IpAddr::V6(aaaa.0)),
                RData::NS(ns) => nameservers.push(ns.0.clone()),
                _ => {}
            }
        }

        let glue = message
            .additionals()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some((record.name().clone(), IpAddr::V4(a.0))),
                RData::AAAA(aaaa) => Some((record.name().clone(), IpAddr::V6(aaaa.0))),
                _ => None,
            })
            .collect::<Vec<_>>();

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            nameservers = nameservers.len(),
            glue = glue.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            addresses,
            nameservers,
            glue,
        })
    }

    /// Parses a response and checks it answers the query with `expected_id`.
    pub fn parse_for(expected_id: u16, response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let response = Self::parse(response_bytes)?;
        if response.id != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                response.id, expected_id
            )));
        }
        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
