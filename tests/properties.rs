//! Property-based tests using proptest
//!
//! These tests check the algebraic identities of the subnet arithmetic and the
//! losslessness of the IPv6 text conversions over random addresses.

use ipnum::{host_num, in_net_num, ipv6, match_net_num, net_num};
use proptest::prelude::*;
use std::net::Ipv4Addr;

fn v4_literal() -> impl Strategy<Value = String> {
    any::<u32>().prop_map(|n| Ipv4Addr::from(n).to_string())
}

/// Lowercase, unpadded colon-hex literals, sometimes abbreviated.
fn v6_literal() -> impl Strategy<Value = String> {
    (prop::array::uniform8(prop_oneof![Just(0u16), any::<u16>()]), any::<bool>()).prop_map(
        |(groups, abbreviate)| {
            let text = groups
                .iter()
                .map(|g| format!("{g:x}"))
                .collect::<Vec<_>>()
                .join(":");
            if abbreviate {
                ipv6::to_abbreviation(&text).unwrap().to_lowercase()
            } else {
                text
            }
        },
    )
}

fn octets(ddn: &str) -> Vec<u8> {
    ddn.split('.').map(|o| o.parse().unwrap()).collect()
}

fn v4_value(text: &str) -> u32 {
    u32::from(text.parse::<Ipv4Addr>().unwrap())
}

// Property: IPv4 network and host numbers partition the address bits
proptest! {
    #[test]
    fn prop_v4_net_host_partition(addr in v4_literal(), mask in 0u32..=32) {
        let net = v4_value(&net_num(&addr, mask, false).unwrap());
        let host = v4_value(&host_num(&addr, mask, false).unwrap());

        prop_assert_eq!(net | host, v4_value(&addr));
        prop_assert_eq!(net & host, 0);
    }
}

// Property: IPv6 network and host numbers partition the address bits
proptest! {
    #[test]
    fn prop_v6_net_host_partition(addr in v6_literal(), mask in 0u32..=128) {
        let net = octets(&ipv6::to_dotted_decimal(&net_num(&addr, mask, false).unwrap()).unwrap());
        let host = octets(&ipv6::to_dotted_decimal(&host_num(&addr, mask, false).unwrap()).unwrap());
        let full = octets(&ipv6::to_dotted_decimal(&addr).unwrap());

        for i in 0..16 {
            prop_assert_eq!(net[i] | host[i], full[i]);
            prop_assert_eq!(net[i] & host[i], 0);
        }
    }
}

// Property: abbreviation is a lossless canonicalization
proptest! {
    #[test]
    fn prop_abbreviation_round_trip(addr in v6_literal()) {
        let full = ipv6::to_full(&addr).unwrap();
        let abbr = ipv6::to_abbreviation(&full).unwrap();

        prop_assert_eq!(ipv6::to_full(&abbr).unwrap(), full);
        prop_assert!(abbr.matches("::").count() <= 1);
    }
}

// Property: the dotted-decimal intermediate is lossless
proptest! {
    #[test]
    fn prop_dotted_decimal_round_trip(addr in v6_literal()) {
        let ddn = ipv6::to_dotted_decimal(&addr).unwrap();

        prop_assert_eq!(ddn.split('.').count(), 16);
        prop_assert_eq!(ipv6::from_dotted_decimal(&ddn).unwrap(), ipv6::to_full(&addr).unwrap());
    }
}

// Property: boundary masks are identities
proptest! {
    #[test]
    fn prop_boundary_identities(v4 in v4_literal(), v6 in v6_literal()) {
        prop_assert_eq!(net_num(&v4, 32, false).unwrap(), v4.clone());
        prop_assert_eq!(host_num(&v4, 0, false).unwrap(), v4);
        prop_assert_eq!(net_num(&v6, 128, false).unwrap(), v6.to_uppercase());
        prop_assert_eq!(host_num(&v6, 0, false).unwrap(), ipv6::to_full(&v6).unwrap());
    }
}

// Property: binary output is always 32 binary digits
proptest! {
    #[test]
    fn prop_binary_output_width(addr in v4_literal(), mask in 0u32..=32) {
        for bits in [net_num(&addr, mask, true).unwrap(), host_num(&addr, mask, true).unwrap()] {
            prop_assert_eq!(bits.len(), 32);
            prop_assert!(bits.chars().all(|c| c == '0' || c == '1'));
        }
    }
}

// Property: an address is in the subnet named by its own network number
proptest! {
    #[test]
    fn prop_address_in_own_network(addr in v6_literal(), mask in 0u32..=128, extra in 0u32..=128) {
        let net = net_num(&addr, mask, false).unwrap();
        let sample_mask = mask.max(extra);
        let addr_cidr = format!("{addr}/{mask}");
        let net_cidr = format!("{net}/{mask}");
        let sample_cidr = format!("{addr}/{sample_mask}");

        prop_assert!(match_net_num([addr_cidr.as_str(), net_cidr.as_str()]));
        prop_assert!(in_net_num(net_cidr.as_str(), [sample_cidr.as_str()]));
    }
}
