use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::version::{IpVersion, ip_version};

static CIDR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^/]+)/([0-9]{1,3})$").expect("CIDR pattern is valid"));

/// An address literal paired with a prefix length.
///
/// The prefix length is not range checked here; the arithmetic rejects
/// out-of-range masks when it is asked to use them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cidr {
    /// Address literal, kept verbatim.
    pub address: String,
    /// Number of leading network bits.
    pub prefix_len: u32,
}

impl Cidr {
    /// Create a new CIDR pair.
    pub fn new(address: impl Into<String>, prefix_len: u32) -> Self {
        Self {
            address: address.into(),
            prefix_len,
        }
    }

    /// Address family of the literal.
    pub fn version(&self) -> IpVersion {
        ip_version(&self.address)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

/// Parse `"<address>/<prefix>"` text.
///
/// Returns `None` when the text does not have that shape. This is the lenient
/// boundary of the crate: callers treat `None` as "unparsable" instead of
/// receiving an error.
///
/// # Examples
///
/// ```rust
/// use ipnum::parse_cidr;
///
/// let cidr = parse_cidr("10.0.0.0/8").unwrap();
/// assert_eq!(cidr.address, "10.0.0.0");
/// assert_eq!(cidr.prefix_len, 8);
///
/// assert_eq!(parse_cidr("not-a-cidr"), None);
/// ```
pub fn parse_cidr(text: &str) -> Option<Cidr> {
    let caps = CIDR_PATTERN.captures(text)?;
    let prefix_len = caps[2].parse().ok()?;
    Some(Cidr::new(&caps[1], prefix_len))
}

/// Render a CIDR pair as text. Never fails and does not validate bounds.
pub fn format_cidr(cidr: &Cidr) -> String {
    cidr.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v4() {
        let cidr = parse_cidr("192.168.1.130/24").unwrap();
        assert_eq!(cidr, Cidr::new("192.168.1.130", 24));
        assert_eq!(cidr.version(), IpVersion::V4);
    }

    #[test]
    fn test_parse_v6() {
        let cidr = parse_cidr("2001:db8::1/64").unwrap();
        assert_eq!(cidr.address, "2001:db8::1");
        assert_eq!(cidr.prefix_len, 64);
        assert_eq!(cidr.version(), IpVersion::V6);
    }

    #[test]
    fn test_parse_is_permissive_about_bounds() {
        // Range checks belong to the arithmetic, not the parser.
        assert_eq!(parse_cidr("10.0.0.1/999"), Some(Cidr::new("10.0.0.1", 999)));
        assert_eq!(parse_cidr("anything/0"), Some(Cidr::new("anything", 0)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_cidr("not-a-cidr"), None);
        assert_eq!(parse_cidr("10.0.0.1"), None);
        assert_eq!(parse_cidr("10.0.0.1/"), None);
        assert_eq!(parse_cidr("/24"), None);
        assert_eq!(parse_cidr("10.0.0.1/1234"), None);
        assert_eq!(parse_cidr("10.0.0.1/2a"), None);
        assert_eq!(parse_cidr("a/b/24"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_cidr(&Cidr::new("10.0.0.0", 8)), "10.0.0.0/8");
        assert_eq!(format_cidr(&Cidr::new("::", 300)), "::/300");
    }
}
