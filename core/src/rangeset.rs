//! # Interval Sets
//!
//! [`IpRangeSet`] is the finalized form of one family of one entry: a sorted
//! run of disjoint, non-adjacent inclusive ranges. Adjacent input ranges are
//! coalesced, so `10.0.0.0/24` and `10.0.1.0/24` become one range and one
//! `10.0.0.0/23` prefix when projected.
//!
//! Sets are never mutated after construction; every operation returns a new
//! set.

use std::net::IpAddr;

use geoset_common::network::family::AddressFamily;
use geoset_common::network::prefix::Prefix;
use geoset_common::network::range::{IpRange, addr_to_bits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Span {
    lo: u128,
    hi: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRangeSet {
    family: AddressFamily,
    spans: Vec<Span>,
}

impl IpRangeSet {
    pub fn empty(family: AddressFamily) -> Self {
        Self {
            family,
            spans: Vec::new(),
        }
    }

    /// Builds the minimal cover of `ranges`. Ranges of the other family are
    /// skipped.
    pub fn from_ranges(family: AddressFamily, ranges: impl IntoIterator<Item = IpRange>) -> Self {
        let spans = ranges
            .into_iter()
            .filter(|range| range.family() == family)
            .map(|range| {
                let (lo, hi) = range.bounds();
                Span { lo, hi }
            })
            .collect();
        Self::from_spans(family, spans)
    }

    pub fn from_prefixes(family: AddressFamily, prefixes: impl IntoIterator<Item = Prefix>) -> Self {
        Self::from_ranges(family, prefixes.into_iter().map(IpRange::from))
    }

    /// The cover of `inserts` minus the cover of `removes`.
    pub fn from_parts(
        family: AddressFamily,
        inserts: impl IntoIterator<Item = IpRange>,
        removes: impl IntoIterator<Item = IpRange>,
    ) -> Self {
        let added = Self::from_ranges(family, inserts);
        if added.is_empty() {
            return added;
        }
        added.subtract(&Self::from_ranges(family, removes))
    }

    fn from_spans(family: AddressFamily, mut spans: Vec<Span>) -> Self {
        spans.sort_unstable();

        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.lo <= last.hi.saturating_add(1) => {
                    last.hi = last.hi.max(span.hi);
                }
                _ => merged.push(span),
            }
        }

        Self {
            family,
            spans: merged,
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of disjoint ranges in the set.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn union(&self, other: &IpRangeSet) -> IpRangeSet {
        if other.family != self.family {
            return self.clone();
        }
        let spans = self.spans.iter().chain(other.spans.iter()).copied().collect();
        Self::from_spans(self.family, spans)
    }

    /// Everything in `self` that is not in `other`.
    pub fn subtract(&self, other: &IpRangeSet) -> IpRangeSet {
        if other.family != self.family || other.is_empty() {
            return self.clone();
        }

        let cut = &other.spans;
        let mut out = Vec::with_capacity(self.spans.len());
        let mut first = 0;

        for span in &self.spans {
            while first < cut.len() && cut[first].hi < span.lo {
                first += 1;
            }

            let mut lo = span.lo;
            let mut survives = true;
            for hole in cut[first..].iter().take_while(|hole| hole.lo <= span.hi) {
                if hole.lo > lo {
                    out.push(Span { lo, hi: hole.lo - 1 });
                }
                if hole.hi >= span.hi {
                    survives = false;
                    break;
                }
                lo = hole.hi + 1;
            }
            if survives {
                out.push(Span { lo, hi: span.hi });
            }
        }

        Self {
            family: self.family,
            spans: out,
        }
    }

    pub fn contains_addr(&self, addr: &IpAddr) -> bool {
        let bits = addr_to_bits(*addr);
        AddressFamily::of(addr) == self.family && self.covers(bits, bits)
    }

    /// `true` when every address of `range` is in the set.
    pub fn contains_range(&self, range: &IpRange) -> bool {
        let (lo, hi) = range.bounds();
        range.family() == self.family && self.covers(lo, hi)
    }

    pub fn contains_prefix(&self, prefix: &Prefix) -> bool {
        self.contains_range(&prefix.range())
    }

    fn covers(&self, lo: u128, hi: u128) -> bool {
        let idx = self.spans.partition_point(|span| span.hi < lo);
        self.spans
            .get(idx)
            .is_some_and(|span| span.lo <= lo && hi <= span.hi)
    }

    pub fn ranges(&self) -> impl Iterator<Item = IpRange> + '_ {
        self.spans
            .iter()
            .map(|span| IpRange::from_bits(self.family, span.lo, span.hi))
    }

    /// The minimal CIDR decomposition of the set, in address order.
    pub fn prefixes(&self) -> Vec<Prefix> {
        self.ranges().flat_map(|range| range.to_cidrs()).collect()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
