//! Text conversions for IPv6 literals.
//!
//! Every conversion goes through [`to_full`], the canonical form with eight
//! groups of four uppercase hex digits. The 16-octet dotted-decimal form is a
//! byte-addressable intermediate for the subnet arithmetic and is not meant
//! for display.

use crate::error::{IpError, Result};

/// Number of 16-bit groups in an IPv6 address.
pub const GROUPS: usize = 8;

/// Number of octets in an IPv6 address.
pub const OCTETS: usize = 16;

const ZERO_GROUP: &str = "0000";

/// Expand an IPv6 literal to `XXXX:XXXX:XXXX:XXXX:XXXX:XXXX:XXXX:XXXX`.
///
/// A single `::` is expanded to as many zero groups as are missing; every
/// other group is left-padded to four digits and uppercased.
///
/// # Errors
///
/// Returns [`IpError::InvalidIpv6`] if `text` is not a valid literal: more
/// than one `::`, a group that is empty or not 1-4 hex digits, or the wrong
/// group count.
///
/// # Examples
///
/// ```rust
/// use ipnum::ipv6::to_full;
///
/// assert_eq!(to_full("2001:db8::1").unwrap(), "2001:0DB8:0000:0000:0000:0000:0000:0001");
/// assert!(to_full("2001:db8::1::2").is_err());
/// ```
pub fn to_full(text: &str) -> Result<String> {
    let groups = expand_groups(text).ok_or_else(|| IpError::InvalidIpv6(text.to_string()))?;
    Ok(groups.join(":"))
}

fn expand_groups(text: &str) -> Option<Vec<String>> {
    let Some((head, tail)) = text.split_once("::") else {
        let groups = split_groups(text)?;
        return (groups.len() == GROUPS).then_some(groups);
    };
    if tail.contains("::") {
        return None;
    }

    let mut groups = split_groups(head)?;
    let tail = split_groups(tail)?;
    let present = groups.len() + tail.len();
    // `::` always stands for at least one group.
    if present >= GROUPS {
        return None;
    }
    groups.extend(std::iter::repeat_n(ZERO_GROUP.to_string(), GROUPS - present));
    groups.extend(tail);
    Some(groups)
}

fn split_groups(part: &str) -> Option<Vec<String>> {
    if part.is_empty() {
        return Some(Vec::new());
    }
    part.split(':').map(pad_group).collect()
}

fn pad_group(group: &str) -> Option<String> {
    let well_formed =
        (1..=4).contains(&group.len()) && group.bytes().all(|b| b.is_ascii_hexdigit());
    well_formed.then(|| format!("{:0>4}", group.to_ascii_uppercase()))
}

/// Abbreviate an IPv6 literal.
///
/// Leading zeros are stripped from each group and the longest run of zero
/// groups is replaced by `::`. When several runs share the greatest length,
/// the earliest one is compressed. A lone zero group is compressed as well.
///
/// # Examples
///
/// ```rust
/// use ipnum::ipv6::to_abbreviation;
///
/// assert_eq!(to_abbreviation("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap(), "2001:DB8::1");
/// assert_eq!(to_abbreviation("1:0:2:3:4:5:6:7").unwrap(), "1::2:3:4:5:6:7");
/// ```
pub fn to_abbreviation(text: &str) -> Result<String> {
    let full = to_full(text)?;
    let groups: Vec<&str> = full
        .split(':')
        .map(|group| match group.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        })
        .collect();

    Ok(match longest_zero_run(&groups) {
        Some((start, len)) => format!(
            "{}::{}",
            groups[..start].join(":"),
            groups[start + len..].join(":")
        ),
        None => groups.join(":"),
    })
}

/// Start and length of the longest run of `"0"` groups, earliest on ties.
fn longest_zero_run(groups: &[&str]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut start = 0;

    while start < groups.len() {
        if groups[start] != "0" {
            start += 1;
            continue;
        }
        let len = groups[start..].iter().take_while(|g| **g == "0").count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
        start += len;
    }

    best
}

/// The 32 hex digits of the full form, without separators.
pub fn to_hex_string(text: &str) -> Result<String> {
    Ok(to_full(text)?.replace(':', ""))
}

/// Render an IPv6 literal as 16 dot-separated decimal octets.
///
/// ```rust
/// use ipnum::ipv6::to_dotted_decimal;
///
/// assert_eq!(to_dotted_decimal("ff00::1").unwrap(), "255.0.0.0.0.0.0.0.0.0.0.0.0.0.0.1");
/// ```
pub fn to_dotted_decimal(text: &str) -> Result<String> {
    let hex = to_hex_string(text)?;
    let octets = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map(|octet| octet.to_string()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| IpError::InvalidIpv6(text.to_string()))?;
    Ok(octets.join("."))
}

/// Convert 16 dot-separated decimal octets back to colon-hex form.
///
/// The result is always the full form.
///
/// # Errors
///
/// Returns [`IpError::InvalidDottedDecimal`] unless the input has exactly 16
/// components, each a decimal value in `0..=255`.
pub fn from_dotted_decimal(ddn: &str) -> Result<String> {
    let invalid = || IpError::InvalidDottedDecimal(ddn.to_string());

    let octets = ddn
        .split('.')
        .map(|part| part.parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<u8>>>()?;
    if octets.len() != OCTETS {
        return Err(invalid());
    }

    let groups: Vec<String> = octets
        .chunks(2)
        .map(|pair| format!("{:02X}{:02X}", pair[0], pair[1]))
        .collect();
    Ok(groups.join(":"))
}
