//! # Error Taxonomy
//!
//! Every failure the core can report, as a single closed enum.
//!
//! [`GeoError::CommentOrBlankLine`] is a control signal rather than a real
//! failure: line-oriented readers are expected to skip it and move on.

use thiserror::Error;

use crate::network::family::AddressFamily;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeoError {
    /// Text that does not parse as an IPv4 or IPv6 address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
    /// Raw address bytes that are neither 4 nor 16 bytes long.
    #[error("invalid IP address length: {0} bytes")]
    InvalidAddressLength(usize),
    /// An address/prefix-length pair that does not form a network.
    #[error("invalid IP network: {0}")]
    InvalidNetwork(String),
    /// Text containing `/` that is not a usable CIDR.
    #[error("invalid CIDR: {0}")]
    InvalidCidr(String),
    /// An IPv4-mapped prefix that does not cover whole IPv4 bits.
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),
    #[error("invalid prefix input shape: {0}")]
    InvalidPrefixInputShape(String),
    #[error("{family} is not valid for this operation on entry {entry}")]
    InvalidFamilyForOperation { entry: String, family: AddressFamily },
    #[error("comment or blank line")]
    CommentOrBlankLine,
    #[error("entry {0} has no prefix")]
    EntryHasNoPrefix(String),
    #[error("entry {0} not found")]
    EntryNotFound(String),
    #[error("invalid entry name: {0:?}")]
    InvalidEntryName(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

impl GeoError {
    /// Returns `true` for conditions a line reader should silently skip.
    pub fn is_skippable(&self) -> bool {
        matches!(self, GeoError::CommentOrBlankLine)
    }
}
