//! Inbound query validation.
//!
//! The only place untrusted network bytes enter the system. A query either
//! decodes and passes every conformance check, yielding a [`DnsRequest`],
//! or the packet is dropped — no partial object, no error reply (nothing in
//! an unparseable packet can be trusted as a transaction id or address).

use hickory_proto::op::{Message, OpCode, ResponseCode};
use hickory_proto::rr::DNSClass;
use quartz_dns_domain::wire::MAX_UDP_SIZE;
use quartz_dns_domain::{name, DnsError, DnsRequest};
use std::net::SocketAddr;
use tracing::debug;

pub struct RequestBuilder;

impl RequestBuilder {
    /// Validate raw query bytes and extract a [`DnsRequest`].
    ///
    /// Accepted queries carry exactly one IN-class question with a clean
    /// name, a QUERY opcode, a NOERROR response code, and empty answer and
    /// authority sections. Anything else is a reject; the caller's policy
    /// is to drop the packet.
    pub fn build(wire: &[u8], src: SocketAddr) -> Result<DnsRequest, DnsError> {
        let message = Message::from_vec(wire).map_err(|e| {
            debug!(client = %src, error = %e, "Dropping undecodable query");
            DnsError::MalformedQuery(format!("Failed to decode query: {}", e))
        })?;

        let header = message.header();

        if header.op_code() != OpCode::Query {
            return Err(reject(src, "opcode is not QUERY"));
        }
        if header.response_code() != ResponseCode::NoError {
            return Err(reject(src, "response code is not NOERROR"));
        }
        // A query smuggling pre-filled sections is treated as hostile.
        if message.queries().len() != 1
            || !message.answers().is_empty()
            || !message.name_servers().is_empty()
        {
            return Err(reject(src, "unexpected section counts"));
        }

        let question = &message.queries()[0];

        if question.query_class() != DNSClass::IN {
            debug!(client = %src, class = ?question.query_class(), "Dropping non-IN query");
            return Err(DnsError::MalformedQuery(
                "question class is not IN".to_string(),
            ));
        }

        let qname = question.name();
        if name::is_dirty(qname.iter()) {
            debug!(client = %src, "Dropping query with dirty name");
            return Err(DnsError::MalformedQuery("dirty question name".to_string()));
        }

        let tld = name::last_label(qname.iter());

        // 512 is the floor: EDNS can only raise the negotiated size.
        let (edns, max_size, dnssec) = match message.extensions() {
            Some(edns) => {
                let advertised = edns.max_payload();
                let max_size = if advertised >= MAX_UDP_SIZE {
                    advertised
                } else {
                    MAX_UDP_SIZE
                };
                (true, max_size, edns.flags().dnssec_ok)
            }
            None => (false, MAX_UDP_SIZE, false),
        };

        let request = DnsRequest::new(
            header.id(),
            qname.num_labels(),
            qname.to_utf8(),
            question.query_type().into(),
            u16::from(question.query_class()),
            header.recursion_desired(),
            header.checking_disabled(),
            edns,
            max_size,
            dnssec,
            tld,
            src,
        );

        debug!(
            name = %request.name,
            qtype = request.qtype,
            client = %src,
            edns = request.edns,
            dnssec = request.dnssec,
            "Query accepted"
        );

        Ok(request)
    }
}

fn reject(src: SocketAddr, reason: &str) -> DnsError {
    debug!(client = %src, reason, "Dropping non-conforming query");
    DnsError::ProtocolViolation(reason.to_string())
}
