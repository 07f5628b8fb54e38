use hickory_proto::op::Message;
use hickory_proto::rr::{Record, RecordType};

/// Drops RRSIG and SIG records from every section of the message.
///
/// A client that did not set the DO bit cannot validate signatures; sending
/// them only inflates the reply.
pub fn strip_signature_records(message: &mut Message) {
    let answers = retain_unsigned(message.take_answers());
    message.insert_answers(answers);

    let authority = retain_unsigned(message.take_name_servers());
    message.insert_name_servers(authority);

    let additionals = retain_unsigned(message.take_additionals());
    message.insert_additionals(additionals);
}

fn retain_unsigned(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| !matches!(record.record_type(), RecordType::RRSIG | RecordType::SIG))
        .collect()
}
