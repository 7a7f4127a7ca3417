use std::fmt;
use std::net::Ipv4Addr;

use crate::ipv6;

/// Address family of a text literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Numeric tag, `4` or `6`.
    pub fn number(self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }

    /// Largest valid prefix length for this family.
    pub fn max_prefix(self) -> u32 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv{}", self.number())
    }
}

/// Classify a literal: anything containing a colon is IPv6, everything else IPv4.
///
/// No validation happens here.
pub fn ip_version(text: &str) -> IpVersion {
    if text.contains(':') {
        IpVersion::V6
    } else {
        IpVersion::V4
    }
}

/// Check whether `text` is a dotted-quad IPv4 literal.
pub fn is_ipv4(text: &str) -> bool {
    text.parse::<Ipv4Addr>().is_ok()
}

/// Check whether `text` is an IPv6 literal accepted by [`ipv6::to_full`].
pub fn is_ipv6(text: &str) -> bool {
    ipv6::to_full(text).is_ok()
}
