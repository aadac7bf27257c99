//! # Inclusive IP Ranges
//!
//! An [`IpRange`] is a continuous run of addresses of a single family,
//! `start..=end`. Ranges are what interval sets store; prefixes are what
//! most file formats want, so [`IpRange::to_cidrs`] decomposes a range into
//! the minimal list of CIDR blocks covering it exactly.
//!
//! Internally both families are handled as `u128` so that one set of
//! arithmetic serves IPv4 and IPv6 alike.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{GeoError, Result};
use crate::network::family::AddressFamily;
use crate::network::prefix::Prefix;

/// Represents a continuous range of addresses, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpRange {
    start: IpAddr,
    end: IpAddr,
}

impl IpRange {
    /// Builds a range, rejecting mixed families and reversed bounds.
    pub fn new(start: IpAddr, end: IpAddr) -> Result<Self> {
        let family = AddressFamily::of(&start);
        if family != AddressFamily::of(&end) || addr_to_bits(start) > addr_to_bits(end) {
            return Err(GeoError::InvalidNetwork(format!("{start}-{end}")));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from raw bounds. Callers guarantee `lo <= hi` and that
    /// both fit in `family`.
    pub fn from_bits(family: AddressFamily, lo: u128, hi: u128) -> Self {
        Self {
            start: bits_to_addr(family, lo),
            end: bits_to_addr(family, hi),
        }
    }

    pub fn start(&self) -> IpAddr {
        self.start
    }

    pub fn end(&self) -> IpAddr {
        self.end
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.start)
    }

    pub fn bounds(&self) -> (u128, u128) {
        (addr_to_bits(self.start), addr_to_bits(self.end))
    }

    pub fn contains(&self, addr: &IpAddr) -> bool {
        if AddressFamily::of(addr) != self.family() {
            return false;
        }
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&addr_to_bits(*addr))
    }

    /// Splits the range into the fewest CIDR blocks that cover it exactly.
    pub fn to_cidrs(&self) -> Vec<Prefix> {
        let family = self.family();
        let width = u32::from(family.max_prefix());
        let (mut lo, hi) = self.bounds();
        let mut out = Vec::new();

        loop {
            // Largest block aligned at `lo` that does not run past `hi`.
            let mut size = lo.trailing_zeros().min(width);
            while block_last(lo, size).is_none_or(|last| last > hi) {
                size -= 1;
            }
            out.push(Prefix::from_bits(family, lo, (width - size) as u8));

            match block_last(lo, size).and_then(|last| last.checked_add(1)) {
                Some(next) if next <= hi => lo = next,
                _ => break,
            }
        }
        out
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<Prefix> for IpRange {
    fn from(prefix: Prefix) -> Self {
        let (lo, hi) = cidr_bounds(prefix.family(), addr_to_bits(prefix.addr()), prefix.len());
        IpRange::from_bits(prefix.family(), lo, hi)
    }
}

/// Last address of the `2^size` block starting at `lo`, if it fits in `u128`.
fn block_last(lo: u128, size: u32) -> Option<u128> {
    let span = if size >= 128 { u128::MAX } else { (1u128 << size) - 1 };
    lo.checked_add(span)
}

pub fn addr_to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Inverse of [`addr_to_bits`]. IPv4 values are truncated to 32 bits.
pub fn bits_to_addr(family: AddressFamily, bits: u128) -> IpAddr {
    match family {
        AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// First and last address (as bits) of the network `bits/len`.
pub fn cidr_bounds(family: AddressFamily, bits: u128, len: u8) -> (u128, u128) {
    let host_bits = u32::from(family.max_prefix() - len.min(family.max_prefix()));
    let host_mask = if host_bits >= 128 { u128::MAX } else { (1u128 << host_bits) - 1 };
    let network = bits & !host_mask;
    (network, network | host_mask)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn cidrs(range: IpRange) -> Vec<String> {
        range.to_cidrs().iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_range_new_rejects_reversed_and_mixed() {
        assert!(IpRange::new(v4("10.0.0.5"), v4("10.0.0.1")).is_err());
        assert!(IpRange::new(v4("10.0.0.1"), "::1".parse().unwrap()).is_err());
        assert!(IpRange::new(v4("10.0.0.1"), v4("10.0.0.1")).is_ok());
    }

    #[test]
    fn test_range_contains() {
        let range = IpRange::new(v4("10.0.0.1"), v4("10.0.0.3")).unwrap();
        assert!(range.contains(&v4("10.0.0.2")));
        assert!(!range.contains(&v4("10.0.0.4")));
        assert!(!range.contains(&"::a00:2".parse().unwrap()));
    }

    #[test]
    fn test_to_cidrs_aligned_block() {
        let range = IpRange::new(v4("192.168.1.0"), v4("192.168.1.255")).unwrap();
        assert_eq!(cidrs(range), vec!["192.168.1.0/24"]);
    }

    #[test]
    fn test_to_cidrs_unaligned() {
        let range = IpRange::new(v4("10.0.0.1"), v4("10.0.0.6")).unwrap();
        assert_eq!(
            cidrs(range),
            vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/31", "10.0.0.6/32"]
        );
    }

    #[test]
    fn test_to_cidrs_full_spaces() {
        let all_v4 = IpRange::new(v4("0.0.0.0"), v4("255.255.255.255")).unwrap();
        assert_eq!(cidrs(all_v4), vec!["0.0.0.0/0"]);

        let all_v6 = IpRange::new(
            "::".parse().unwrap(),
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(cidrs(all_v6), vec!["::/0"]);
    }

    #[test]
    fn test_to_cidrs_top_of_space() {
        let range = IpRange::new(v4("255.255.255.254"), v4("255.255.255.255")).unwrap();
        assert_eq!(cidrs(range), vec!["255.255.255.254/31"]);
    }

    #[test]
    fn test_cidr_bounds() {
        let bits = addr_to_bits(v4("192.168.1.100"));
        let (lo, hi) = cidr_bounds(AddressFamily::V4, bits, 24);
        assert_eq!(bits_to_addr(AddressFamily::V4, lo), v4("192.168.1.0"));
        assert_eq!(bits_to_addr(AddressFamily::V4, hi), v4("192.168.1.255"));

        let (lo, hi) = cidr_bounds(AddressFamily::V4, bits, 0);
        assert_eq!(bits_to_addr(AddressFamily::V4, lo), v4("0.0.0.0"));
        assert_eq!(bits_to_addr(AddressFamily::V4, hi), v4("255.255.255.255"));
    }
}
