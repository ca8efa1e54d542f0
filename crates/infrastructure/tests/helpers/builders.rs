#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, NS};
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Response skeleton echoing the request's ID and question.
pub fn response_to(request: &Message, rcode: ResponseCode) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(request.recursion_desired());
    response.set_response_code(rcode);
    for query in request.queries() {
        response.add_query(query.clone());
    }
    response
}

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn ns_record(zone: &str, target: &str) -> Record {
    Record::from_rdata(name(zone), 300, RData::NS(NS(name(target))))
}

pub fn a_record(owner: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip)))
}

/// First question's name without the trailing dot, lowercased.
pub fn question(request: &Message) -> String {
    request
        .queries()
        .first()
        .map(|q| q.name().to_utf8().trim_end_matches('.').to_ascii_lowercase())
        .unwrap_or_default()
}
