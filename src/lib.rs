//! # IP Number Algebra
//!
//! A lightweight library for working with IP address literals as text:
//! parsing CIDR notation, canonicalizing IPv6 literals, and computing network
//! and host numbers for IPv4 and IPv6 without any 128-bit integer math.
//!
//! ## Features
//!
//! - Version detection and syntactic IPv4/IPv6 checks
//! - CIDR parsing and formatting, with a lenient "not a CIDR" outcome
//! - IPv6 full form, abbreviation, flat hex and 16-octet dotted-decimal conversions
//! - Network/host number arithmetic, with optional binary display output
//! - Network equality and subnet membership predicates
//! - Client and server address discovery from environment or header variables
//! - Optional Axum middleware and extractor via the `axum` feature
//! - Optional geo-IP lookup via the `geoip` feature
//!
//! ## Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use ipnum::{host_num, in_net_num, ipv6, net_num};
//!
//! assert_eq!(net_num("192.168.1.130", 24, false).unwrap(), "192.168.1.0");
//! assert_eq!(host_num("192.168.1.130", 24, false).unwrap(), "0.0.0.130");
//!
//! assert_eq!(
//!     ipv6::to_abbreviation("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap(),
//!     "2001:DB8::1"
//! );
//!
//! assert!(in_net_num("10.0.0.0/8", ["10.1.2.3/32"]));
//! ```

pub mod cidr;
pub mod discovery;
pub mod error;
pub mod ipv6;
pub mod matcher;
pub mod subnet;
pub mod version;

#[cfg(feature = "axum")]
pub mod middleware;

#[cfg(feature = "geoip")]
pub mod geo;

pub use cidr::{Cidr, format_cidr, parse_cidr};
pub use discovery::{
    Environment, HeaderMap, IpDiscovery, UNKNOWN_IP, VarSource, cgi_key, client_ip, server_ip,
};
pub use error::{IpError, Result};
pub use matcher::{CidrInput, in_net_num, match_net_num};
pub use subnet::{host_num, host_num_cidr, net_num, net_num_cidr};
pub use version::{IpVersion, ip_version, is_ipv4, is_ipv6};

#[cfg(feature = "axum")]
pub use middleware::{ClientIp, ClientIpLayer, ClientIpService};

#[cfg(feature = "geoip")]
pub use geo::{GeoIpClient, geo_lookup};
