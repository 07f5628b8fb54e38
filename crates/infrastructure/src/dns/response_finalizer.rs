//! Outbound reply shaping.
//!
//! Takes the answer message some upstream stage produced, together with the
//! originating request, and emits the final wire bytes. Everything the
//! client negotiated — transaction id, RD/CD echo, EDNS state, size budget,
//! DNSSEC record policy — is re-derived from the request here, never
//! trusted from the answer producer.

use crate::dns::sig0::Sig0Signer;
use crate::dns::{codec, record_filter, sig0, truncation};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use quartz_dns_domain::wire::{EDNS_BUFFER_SIZE, HEADER_SIZE};
use quartz_dns_domain::{DnsError, DnsRequest};
use tracing::debug;

pub struct ResponseFinalizer;

impl ResponseFinalizer {
    /// Consume `answer` and produce the final reply bytes.
    ///
    /// Builds a fresh reply message rather than patching the input, so a
    /// failure part-way never leaves the caller holding a half-mutated
    /// message. On any error the answer is simply dropped.
    pub fn finalize(
        mut answer: Message,
        request: &DnsRequest,
        signer: Option<&Sig0Signer>,
    ) -> Result<Vec<u8>, DnsError> {
        let mut reply = Message::new(request.id, MessageType::Response, OpCode::Query);
        reply.set_recursion_desired(request.rd);
        reply.set_checking_disabled(request.cd);
        // Flags the answer producer owns are carried over untouched.
        reply.set_authoritative(answer.authoritative());
        reply.set_recursion_available(answer.recursion_available());
        reply.set_authentic_data(answer.authentic_data());
        reply.set_truncated(answer.truncated());
        reply.set_response_code(answer.response_code());

        // EDNS state comes from the request alone; whatever the answer
        // producer attached, options included, is discarded.
        if request.edns {
            let mut edns = Edns::new();
            edns.set_version(0);
            edns.set_max_payload(EDNS_BUFFER_SIZE);
            edns.set_dnssec_ok(request.dnssec);
            reply.set_edns(edns);
        }

        // The question section is a verbatim echo of what was asked.
        let name = Name::from_utf8(&request.name).map_err(|e| {
            DnsError::EncodeFailed(format!("Invalid question name '{}': {}", request.name, e))
        })?;
        reply.add_query(Query::query(name, RecordType::from(request.qtype)));

        reply.insert_answers(answer.take_answers());
        reply.insert_name_servers(answer.take_name_servers());
        reply.insert_additionals(answer.take_additionals());

        if !request.dnssec {
            record_filter::strip_signature_records(&mut reply);
        }

        let wire = codec::serialize(&reply)?;

        // Leave room for the transaction signature when signing. max_size
        // never drops below 512 for built requests, so the header floor
        // only guards hand-constructed ones.
        let max_size = (request.max_size as usize)
            .saturating_sub(sig0::reserved_size(signer))
            .max(HEADER_SIZE);
        let wire = truncation::truncate(wire, max_size)?;

        debug!(
            id = request.id,
            size = wire.len(),
            signed = signer.is_some(),
            "Response finalized"
        );

        sig0::sign(signer, wire)
    }
}
