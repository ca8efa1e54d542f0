//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`.

use dnsperf_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// A serialized query together with the ID needed to match its response.
#[derive(Debug, Clone)]
pub struct QueryMessage {
    pub id: u16,
    pub bytes: Vec<u8>,
}

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a DNS query message and serialize to wire format bytes
    ///
    /// Creates a single-question query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag as requested
    ///
    /// # Arguments
    /// * `domain` - Domain name to query (e.g., "google.com")
    /// * `record_type` - DNS record type (A, AAAA, NS, ...)
    /// * `recursion_desired` - Set for recursive resolvers, clear for
    ///   authoritative-style lookups
    pub fn build_query(
        domain: &str,
        record_type: RecordType,
        recursion_desired: bool,
    ) -> Result<QueryMessage, DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(recursion_desired);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok(QueryMessage { id, bytes })
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
