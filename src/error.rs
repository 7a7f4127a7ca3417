use thiserror::Error;

/// Result type alias for operations that may fail with `IpError`.
pub type Result<T> = std::result::Result<T, IpError>;

/// Errors raised by the literal codecs and the subnet arithmetic.
///
/// Unparsable CIDR text is not an error: the CIDR-level entry points report it
/// as `None` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IpError {
    /// Text is not a syntactically valid IPv6 literal.
    #[error("Invalid IPv6 address format: {0}")]
    InvalidIpv6(String),

    /// Text is not a syntactically valid IPv4 literal.
    #[error("Invalid IPv4 address format: {0}")]
    InvalidIpv4(String),

    /// Dotted-decimal intermediate without 16 octets in `0..=255`.
    #[error("Invalid dotted-decimal IPv6 form: {0}")]
    InvalidDottedDecimal(String),

    /// Prefix length outside `0..=max` for the address family.
    #[error("Subnet mask out of range: {mask} (expected 0..={max})")]
    MaskOutOfRange { mask: u32, max: u32 },

    /// The geo-IP service could not be reached or returned undecodable data.
    #[cfg(feature = "geoip")]
    #[error("Geo-IP lookup failed: {0}")]
    GeoLookup(String),
}

impl IpError {
    /// Whether the literal did not match the expected grammar.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            IpError::InvalidIpv6(_) | IpError::InvalidIpv4(_) | IpError::InvalidDottedDecimal(_)
        )
    }

    /// Whether a prefix length was outside the range of its address family.
    pub fn is_range_error(&self) -> bool {
        matches!(self, IpError::MaskOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(IpError::InvalidIpv6("x".into()).is_format_error());
        assert!(IpError::InvalidDottedDecimal("1.2".into()).is_format_error());
        assert!(!IpError::InvalidIpv4("x".into()).is_range_error());

        let err = IpError::MaskOutOfRange { mask: 33, max: 32 };
        assert!(err.is_range_error());
        assert!(!err.is_format_error());
        assert_eq!(err.to_string(), "Subnet mask out of range: 33 (expected 0..=32)");
    }
}
