use thiserror::Error;

/// Terminal failures of a single request/response exchange. Nothing here is
/// retried; the request path drops the packet, the response path surfaces
/// the error to the caller.
#[derive(Error, Debug, Clone)]
pub enum DnsError {
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodeFailed(String),

    #[error("Failed to truncate DNS message: {0}")]
    TruncateFailed(String),

    #[error("Failed to sign DNS message: {0}")]
    SignFailed(String),
}
