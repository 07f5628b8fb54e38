//! Wire-format constants shared by the request and response paths.

/// Reply size floor for clients that did not negotiate EDNS (RFC 1035).
pub const MAX_UDP_SIZE: u16 = 512;

/// Buffer size advertised in replies to EDNS-capable clients.
pub const EDNS_BUFFER_SIZE: u16 = 4096;

/// Fixed DNS header length.
pub const HEADER_SIZE: usize = 12;
