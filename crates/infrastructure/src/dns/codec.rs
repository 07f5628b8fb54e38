use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use quartz_dns_domain::DnsError;

/// Serialize a message to wire format bytes.
pub(crate) fn serialize(message: &Message) -> Result<Vec<u8>, DnsError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message
        .emit(&mut encoder)
        .map_err(|e| DnsError::EncodeFailed(e.to_string()))?;

    Ok(buf)
}
