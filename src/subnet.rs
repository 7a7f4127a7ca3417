//! Network and host number arithmetic.
//!
//! IPv4 math works on the 32-bit value of the dotted quad. IPv6 math never
//! builds a 128-bit integer: the address is rendered as 16 decimal octets,
//! cut into four 32-bit groups, and the group containing the mask boundary is
//! handed to the IPv4 routine as if it were a dotted quad.

use std::cmp::Ordering;
use std::net::Ipv4Addr;

use tracing::trace;

use crate::cidr::parse_cidr;
use crate::error::{IpError, Result};
use crate::ipv6;
use crate::version::{IpVersion, ip_version};

const GROUP_BITS: u32 = 32;
const GROUP_OCTETS: usize = 4;
const ZERO_GROUP: &str = "0.0.0.0";

/// Which half of the address an operation keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Network,
    Host,
}

/// Clear the host bits of `address`.
///
/// With `binary` set, an IPv4 result is returned as the binary digits of the
/// network number padded on the right with `'0'` to 32 characters. This is a
/// display convention and does not keep bit positions for networks whose
/// first octet is below 128. IPv6 results are always colon-hex; `binary` is
/// ignored for them.
///
/// An IPv6 address with a mask of 128 is returned uppercased and otherwise
/// untouched.
///
/// # Errors
///
/// - [`IpError::MaskOutOfRange`] if `mask` exceeds 32 (IPv4) or 128 (IPv6).
/// - A format error if the address literal is malformed.
///
/// # Examples
///
/// ```rust
/// use ipnum::net_num;
///
/// assert_eq!(net_num("192.168.1.130", 24, false).unwrap(), "192.168.1.0");
/// assert_eq!(
///     net_num("2001:db8:abcd:1234::1", 48, false).unwrap(),
///     "2001:0DB8:ABCD:0000:0000:0000:0000:0000"
/// );
/// ```
pub fn net_num(address: &str, mask: u32, binary: bool) -> Result<String> {
    match ip_version(address) {
        IpVersion::V4 => v4_net_num(address, mask, binary),
        IpVersion::V6 => {
            check_mask(mask, IpVersion::V6)?;
            if mask == IpVersion::V6.max_prefix() {
                return Ok(address.to_uppercase());
            }
            v6_split(address, mask, Part::Network)
        }
    }
}

/// Clear the network bits of `address`.
///
/// With `binary` set, an IPv4 result is returned as the binary digits of the
/// host number padded on the left with `'0'` to 32 characters. IPv6 results
/// are always colon-hex.
///
/// # Errors
///
/// Same as [`net_num`].
///
/// ```rust
/// use ipnum::host_num;
///
/// assert_eq!(host_num("192.168.1.130", 24, false).unwrap(), "0.0.0.130");
/// ```
pub fn host_num(address: &str, mask: u32, binary: bool) -> Result<String> {
    match ip_version(address) {
        IpVersion::V4 => v4_host_num(address, mask, binary),
        IpVersion::V6 => {
            check_mask(mask, IpVersion::V6)?;
            v6_split(address, mask, Part::Host)
        }
    }
}

/// [`net_num`] over `"<address>/<mask>"` text.
///
/// Returns `Ok(None)` when the text is not CIDR shaped; arithmetic errors on a
/// well-shaped input are still reported.
pub fn net_num_cidr(cidr: &str, binary: bool) -> Result<Option<String>> {
    let Some(parsed) = parse_cidr(cidr) else {
        trace!(cidr, "not a CIDR literal");
        return Ok(None);
    };
    net_num(&parsed.address, parsed.prefix_len, binary).map(Some)
}

/// [`host_num`] over `"<address>/<mask>"` text. See [`net_num_cidr`].
pub fn host_num_cidr(cidr: &str, binary: bool) -> Result<Option<String>> {
    let Some(parsed) = parse_cidr(cidr) else {
        trace!(cidr, "not a CIDR literal");
        return Ok(None);
    };
    host_num(&parsed.address, parsed.prefix_len, binary).map(Some)
}

fn check_mask(mask: u32, version: IpVersion) -> Result<()> {
    let max = version.max_prefix();
    if mask > max {
        return Err(IpError::MaskOutOfRange { mask, max });
    }
    Ok(())
}

fn parse_v4(address: &str) -> Result<u32> {
    address
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| IpError::InvalidIpv4(address.to_string()))
}

/// Network mask for a prefix already known to be in `0..=32`.
fn v4_mask(mask: u32) -> u32 {
    u32::MAX.checked_shl(GROUP_BITS - mask).unwrap_or(0)
}

fn v4_net_num(address: &str, mask: u32, binary: bool) -> Result<String> {
    check_mask(mask, IpVersion::V4)?;
    let net = parse_v4(address)? & v4_mask(mask);

    Ok(if binary {
        format!("{:0<32}", format!("{net:b}"))
    } else {
        Ipv4Addr::from(net).to_string()
    })
}

fn v4_host_num(address: &str, mask: u32, binary: bool) -> Result<String> {
    check_mask(mask, IpVersion::V4)?;
    let addr = parse_v4(address)?;
    let host = addr ^ (addr & v4_mask(mask));

    Ok(if binary {
        format!("{host:032b}")
    } else {
        Ipv4Addr::from(host).to_string()
    })
}

/// Apply the IPv4 routine to the group holding the mask boundary.
///
/// Groups before the boundary are fully network bits and groups after it are
/// fully host bits; each is either copied or zeroed depending on `part`.
fn v6_split(address: &str, mask: u32, part: Part) -> Result<String> {
    let ddn = ipv6::to_dotted_decimal(address)?;
    let octets: Vec<&str> = ddn.split('.').collect();
    let boundary = (mask / GROUP_BITS) as usize;
    let partial_bits = mask % GROUP_BITS;

    let groups = octets
        .chunks(GROUP_OCTETS)
        .enumerate()
        .map(|(index, group)| {
            let group = group.join(".");
            match (index.cmp(&boundary), part) {
                (Ordering::Equal, Part::Network) => v4_net_num(&group, partial_bits, false),
                (Ordering::Equal, Part::Host) => v4_host_num(&group, partial_bits, false),
                (Ordering::Less, Part::Network) | (Ordering::Greater, Part::Host) => Ok(group),
                (Ordering::Less, Part::Host) | (Ordering::Greater, Part::Network) => {
                    Ok(ZERO_GROUP.to_string())
                }
            }
        })
        .collect::<Result<Vec<_>>>()?;

    ipv6::from_dotted_decimal(&groups.join("."))
}
