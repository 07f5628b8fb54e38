use crate::upstream::UpstreamAddr;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// A validated inbound query. Built once by the request builder and read by
/// the response finalizer; the only field that changes afterwards is the
/// nameserver reference, set by the routing stage.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    /// Transaction id, echoed verbatim in the reply.
    pub id: u16,
    /// Label count of the queried name.
    pub labels: u8,
    /// Question name in presentation form, original case preserved.
    pub name: Arc<str>,
    /// Queried record type, echoed in the reply question.
    pub qtype: u16,
    /// Queried class; only IN (1) passes validation.
    pub qclass: u16,
    pub rd: bool,
    pub cd: bool,
    /// Whether the query carried an EDNS OPT record.
    pub edns: bool,
    /// Negotiated maximum reply size. Never below 512.
    pub max_size: u16,
    /// True iff EDNS is enabled and the DO bit was set.
    pub dnssec: bool,
    /// Last label of the name, lowercased. Empty for the root.
    pub tld: Arc<str>,
    ns: Option<UpstreamAddr>,
    /// Sender address, value-copied from the transport.
    pub addr: SocketAddr,
}

impl DnsRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u16,
        labels: u8,
        name: impl Into<Arc<str>>,
        qtype: u16,
        qclass: u16,
        rd: bool,
        cd: bool,
        edns: bool,
        max_size: u16,
        dnssec: bool,
        tld: impl Into<Arc<str>>,
        addr: SocketAddr,
    ) -> Self {
        Self {
            id,
            labels,
            name: name.into(),
            qtype,
            qclass,
            rd,
            cd,
            edns,
            max_size,
            dnssec,
            tld: tld.into(),
            ns: None,
            addr,
        }
    }

    /// Nameserver chosen by the routing stage, if any yet.
    pub fn nameserver(&self) -> Option<&UpstreamAddr> {
        self.ns.as_ref()
    }

    /// Records the routing decision. First write wins; the core itself
    /// never calls this.
    pub fn set_nameserver(&mut self, ns: UpstreamAddr) {
        if self.ns.is_none() {
            self.ns = Some(ns);
        }
    }
}

impl fmt::Display for DnsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query")?;
        writeln!(f, "  id={}", self.id)?;
        writeln!(f, "  labels={}", self.labels)?;
        writeln!(f, "  name={}", self.name)?;
        writeln!(f, "  type={}", self.qtype)?;
        writeln!(f, "  class={}", self.qclass)?;
        writeln!(f, "  edns={}", self.edns)?;
        writeln!(f, "  dnssec={}", self.dnssec)?;
        writeln!(f, "  tld={}", self.tld)?;
        write!(f, "  addr={}", self.addr)
    }
}
