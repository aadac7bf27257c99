//! # Prefix Normalizer
//!
//! Turns every accepted input shape into a canonical [`Prefix`]:
//! * A bare address, widened to a host prefix (`/32` or `/128`).
//! * An address plus prefix length, or an already-built [`IpNetwork`].
//! * Raw address bytes (4 or 16 of them).
//! * Free text such as `10.0.0.0/8 # comment`, `2001:db8::/32` or `1.1.1.1`.
//!
//! Canonical means the host bits are cleared and IPv4-mapped IPv6 input
//! (`::ffff:a.b.c.d`) is stored as plain IPv4.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnetwork::IpNetwork;

use crate::error::{GeoError, Result};
use crate::network::family::AddressFamily;
use crate::network::range::{IpRange, bits_to_addr};

const COMMENT_MARKERS: [&str; 3] = ["#", "//", "/*"];

/// Number of leading bits occupied by the `::ffff:0:0/96` mapping prefix.
const MAPPED_PREFIX_LEN: u8 = 96;

/// A network address with its prefix length. Host bits are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix {
    network: IpNetwork,
}

impl Prefix {
    /// Builds a prefix from the raw network bits. `len` must fit `family`.
    pub fn from_bits(family: AddressFamily, bits: u128, len: u8) -> Self {
        let addr = bits_to_addr(family, bits);
        let network = IpNetwork::new(addr, len.min(family.max_prefix()))
            .unwrap_or_else(|_| IpNetwork::from(addr));
        Self { network }
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.network.ip())
    }

    /// The network address.
    pub fn addr(&self) -> IpAddr {
        self.network.ip()
    }

    pub fn len(&self) -> u8 {
        self.network.prefix()
    }

    pub fn network(&self) -> IpNetwork {
        self.network
    }

    pub fn range(&self) -> IpRange {
        IpRange::from(*self)
    }

    pub fn contains(&self, addr: &IpAddr) -> bool {
        AddressFamily::of(addr) == self.family() && self.network.contains(*addr)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network.ip(), self.network.prefix())
    }
}

impl FromStr for Prefix {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        normalize(PrefixInput::Text(s)).map(|(prefix, _)| prefix)
    }
}

/// The closed set of input shapes the normalizer accepts.
#[derive(Debug, Clone, Copy)]
pub enum PrefixInput<'a> {
    Addr(IpAddr),
    AddrMask(IpAddr, u8),
    Network(IpNetwork),
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl From<IpAddr> for PrefixInput<'_> {
    fn from(addr: IpAddr) -> Self {
        PrefixInput::Addr(addr)
    }
}

impl From<Ipv4Addr> for PrefixInput<'_> {
    fn from(addr: Ipv4Addr) -> Self {
        PrefixInput::Addr(IpAddr::V4(addr))
    }
}

impl From<Ipv6Addr> for PrefixInput<'_> {
    fn from(addr: Ipv6Addr) -> Self {
        PrefixInput::Addr(IpAddr::V6(addr))
    }
}

impl From<(IpAddr, u8)> for PrefixInput<'_> {
    fn from((addr, len): (IpAddr, u8)) -> Self {
        PrefixInput::AddrMask(addr, len)
    }
}

impl From<IpNetwork> for PrefixInput<'_> {
    fn from(network: IpNetwork) -> Self {
        PrefixInput::Network(network)
    }
}

impl From<Prefix> for PrefixInput<'_> {
    fn from(prefix: Prefix) -> Self {
        PrefixInput::Network(prefix.network)
    }
}

impl<'a> From<&'a [u8]> for PrefixInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PrefixInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for PrefixInput<'a> {
    fn from(text: &'a str) -> Self {
        PrefixInput::Text(text)
    }
}

impl<'a> From<&'a String> for PrefixInput<'a> {
    fn from(text: &'a String) -> Self {
        PrefixInput::Text(text.as_str())
    }
}

/// Converts any accepted input into a canonical prefix and its family.
///
/// Text that is empty once comments are stripped yields
/// [`GeoError::CommentOrBlankLine`], which callers skip.
pub fn normalize(input: PrefixInput<'_>) -> Result<(Prefix, AddressFamily)> {
    let prefix = match input {
        PrefixInput::Addr(addr) => from_addr_len(addr, host_len(&addr))?,
        PrefixInput::AddrMask(addr, len) => from_addr_len(addr, len)?,
        PrefixInput::Network(net) => from_addr_len(net.ip(), net.prefix())?,
        PrefixInput::Bytes(bytes) => {
            let addr = addr_from_bytes(bytes)?;
            from_addr_len(addr, host_len(&addr))?
        }
        PrefixInput::Text(text) => from_text(text)?,
    };
    Ok((prefix, prefix.family()))
}

/// Cuts everything from the first comment marker on and trims the rest.
pub fn strip_comment(line: &str) -> &str {
    let cut = COMMENT_MARKERS
        .iter()
        .filter_map(|marker| line.find(marker))
        .min();
    match cut {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

fn host_len(addr: &IpAddr) -> u8 {
    AddressFamily::of(addr).max_prefix()
}

fn addr_from_bytes(bytes: &[u8]) -> Result<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(GeoError::InvalidAddressLength(bytes.len()))
}

fn from_text(text: &str) -> Result<Prefix> {
    let text = strip_comment(text);
    if text.is_empty() {
        return Err(GeoError::CommentOrBlankLine);
    }
    if text.contains(char::is_whitespace) {
        return Err(GeoError::InvalidPrefixInputShape(text.to_string()));
    }

    let Some((addr_str, len_str)) = text.split_once('/') else {
        let addr = text
            .parse::<IpAddr>()
            .map_err(|_| GeoError::InvalidAddress(text.to_string()))?;
        return from_addr_len(addr, host_len(&addr));
    };

    let invalid = || GeoError::InvalidCidr(text.to_string());
    let addr = addr_str.parse::<IpAddr>().map_err(|_| invalid())?;
    let len = len_str.parse::<u8>().map_err(|_| invalid())?;

    // `::ffff:1.2.3.0/120` would be a second spelling of `1.2.3.0/24`.
    if let IpAddr::V6(v6) = addr {
        if v6.to_ipv4_mapped().is_some() {
            return Err(invalid());
        }
    }
    if len > host_len(&addr) {
        return Err(invalid());
    }

    from_addr_len(addr, len)
}

fn from_addr_len(addr: IpAddr, len: u8) -> Result<Prefix> {
    let (addr, len) = match addr {
        IpAddr::V6(v6) if len <= 128 => match v6.to_ipv4_mapped() {
            Some(v4) if len >= MAPPED_PREFIX_LEN => (IpAddr::V4(v4), len - MAPPED_PREFIX_LEN),
            Some(_) => return Err(GeoError::InvalidPrefix(format!("{addr}/{len}"))),
            None => (addr, len),
        },
        _ => (addr, len),
    };

    let network = IpNetwork::new(addr, len)
        .map_err(|e| GeoError::InvalidNetwork(format!("{addr}/{len}: {e}")))?;
    let network = IpNetwork::new(network.network(), len)
        .map_err(|e| GeoError::InvalidNetwork(format!("{addr}/{len}: {e}")))?;

    Ok(Prefix { network })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
