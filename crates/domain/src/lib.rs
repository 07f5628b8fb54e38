//! Quartz DNS Domain Layer
pub mod dns_request;
pub mod errors;
pub mod name;
pub mod upstream;
pub mod wire;

pub use dns_request::DnsRequest;
pub use errors::DnsError;
pub use upstream::UpstreamAddr;
