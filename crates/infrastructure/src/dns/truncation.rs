//! Reply size enforcement.

use crate::dns::codec;
use hickory_proto::op::Message;
use quartz_dns_domain::DnsError;
use tracing::debug;

/// Fit `wire` into `max_size` bytes.
///
/// Bytes already within budget are returned unchanged. Otherwise records
/// are dropped from the tail — additionals first, then authority, then
/// answers — and the TC flag is set so the client knows to retry over TCP.
/// The OPT record rides in the message extensions and is never dropped.
pub fn truncate(wire: Vec<u8>, max_size: usize) -> Result<Vec<u8>, DnsError> {
    if wire.len() <= max_size {
        return Ok(wire);
    }

    let mut message = Message::from_vec(&wire)
        .map_err(|e| DnsError::TruncateFailed(format!("Failed to decode reply: {}", e)))?;

    // Re-encoding applies name compression; that alone may be enough.
    let mut encoded = encode(&message)?;
    if encoded.len() <= max_size {
        return Ok(encoded);
    }

    message.set_truncated(true);
    loop {
        if !drop_last_record(&mut message) {
            return Err(DnsError::TruncateFailed(format!(
                "nothing left to drop within {} byte budget",
                max_size
            )));
        }
        encoded = encode(&message)?;
        if encoded.len() <= max_size {
            debug!(size = encoded.len(), max_size, "Reply truncated");
            return Ok(encoded);
        }
    }
}

fn encode(message: &Message) -> Result<Vec<u8>, DnsError> {
    codec::serialize(message).map_err(|e| DnsError::TruncateFailed(e.to_string()))
}

fn drop_last_record(message: &mut Message) -> bool {
    let mut records = message.take_additionals();
    let dropped = records.pop().is_some();
    message.insert_additionals(records);
    if dropped {
        return true;
    }

    let mut records = message.take_name_servers();
    let dropped = records.pop().is_some();
    message.insert_name_servers(records);
    if dropped {
        return true;
    }

    let mut records = message.take_answers();
    let dropped = records.pop().is_some();
    message.insert_answers(records);
    dropped
}
