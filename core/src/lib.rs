//! The in-memory model every converter reads into or writes out of.
//!
//! * [`rangeset`]: immutable sorted sets of disjoint address ranges.
//! * [`entry`]: one named list, with an append-only builder per family.
//! * [`container`]: the name-keyed registry of entries a conversion job uses.

pub mod container;
pub mod entry;
pub mod rangeset;

pub use container::{Container, EmptyPolicy, RemoveOutcome, RemoveScope};
pub use entry::Entry;
pub use rangeset::IpRangeSet;
