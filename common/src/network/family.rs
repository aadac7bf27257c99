//! Address-family tags and the per-operation family filter.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// The two address families. Always derived from a parsed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub const ALL: [AddressFamily; 2] = [AddressFamily::V4, AddressFamily::V6];

    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    /// Number of bits in an address of this family.
    pub fn max_prefix(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

impl FromStr for AddressFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ipv4" | "v4" | "4" => Ok(AddressFamily::V4),
            "ipv6" | "v6" | "6" => Ok(AddressFamily::V6),
            other => Err(format!("unknown address family: {other}")),
        }
    }
}

/// Excludes one family from an otherwise family-agnostic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IgnoreOption {
    #[default]
    None,
    IgnoreV4,
    IgnoreV6,
}

impl IgnoreOption {
    /// Maps "only keep this family" flags onto the family to ignore.
    ///
    /// Setting both flags (or neither) ignores nothing.
    pub fn from_only(only_v4: bool, only_v6: bool) -> Self {
        match (only_v4, only_v6) {
            (true, false) => IgnoreOption::IgnoreV6,
            (false, true) => IgnoreOption::IgnoreV4,
            _ => IgnoreOption::None,
        }
    }

    /// Parses the `only=ipv4` style used by converter options.
    pub fn from_only_family(family: AddressFamily) -> Self {
        match family {
            AddressFamily::V4 => IgnoreOption::IgnoreV6,
            AddressFamily::V6 => IgnoreOption::IgnoreV4,
        }
    }

    pub fn skips(self, family: AddressFamily) -> bool {
        matches!(
            (self, family),
            (IgnoreOption::IgnoreV4, AddressFamily::V4) | (IgnoreOption::IgnoreV6, AddressFamily::V6)
        )
    }

    /// The families an operation scoped by this option touches.
    pub fn families(self) -> impl Iterator<Item = AddressFamily> {
        AddressFamily::ALL.into_iter().filter(move |f| !self.skips(*f))
    }
}
