//! # Entry
//!
//! One named list (a country, an ASN, a custom set). Each family has its own
//! two-phase pipeline:
//!
//! 1. An append-only batch of inserted and removed ranges.
//! 2. A finalized [`IpRangeSet`], computed lazily on the first read after
//!    any change and never mutated afterwards.
//!
//! Within one batch removals win over insertions, whatever order they were
//! made in, so the finalized set depends only on the multiset of calls.
//! [`Entry::finalize`] closes the batch by folding it into the finalized
//! base; insertions made after that may re-add previously removed space.

use std::sync::{Arc, OnceLock};

use geoset_common::error::{GeoError, Result};
use geoset_common::network::family::{AddressFamily, IgnoreOption};
use geoset_common::network::prefix::{Prefix, PrefixInput, normalize};
use geoset_common::network::range::IpRange;

use crate::rangeset::IpRangeSet;

/// Canonical form of an entry name: trimmed and upper-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

#[derive(Debug, Clone)]
struct FamilyBuilder {
    family: AddressFamily,
    base: Option<Arc<IpRangeSet>>,
    inserted: Vec<IpRange>,
    removed: Vec<IpRange>,
    cache: OnceLock<Option<Arc<IpRangeSet>>>,
}

impl FamilyBuilder {
    fn new(family: AddressFamily) -> Self {
        Self {
            family,
            base: None,
            inserted: Vec::new(),
            removed: Vec::new(),
            cache: OnceLock::new(),
        }
    }

    /// Whether anything was ever accumulated that a removal could act on.
    fn has_data(&self) -> bool {
        self.base.is_some() || !self.inserted.is_empty()
    }

    fn is_pending(&self) -> bool {
        !self.inserted.is_empty() || !self.removed.is_empty()
    }

    fn insert(&mut self, range: IpRange) {
        self.inserted.push(range);
        self.cache.take();
    }

    fn remove(&mut self, range: IpRange) {
        self.removed.push(range);
        self.cache.take();
    }

    fn finalized(&self) -> Option<Arc<IpRangeSet>> {
        if !self.is_pending() {
            return self.base.clone();
        }
        self.cache.get_or_init(|| self.build()).clone()
    }

    fn build(&self) -> Option<Arc<IpRangeSet>> {
        let base = self.base.iter().flat_map(|set| set.ranges());
        let set = IpRangeSet::from_parts(
            self.family,
            base.chain(self.inserted.iter().copied()),
            self.removed.iter().copied(),
        );
        (!set.is_empty()).then(|| Arc::new(set))
    }

    fn finalize(&mut self) {
        if self.is_pending() {
            self.base = self.finalized();
            self.inserted.clear();
            self.removed.clear();
            self.cache.take();
        }
    }

    fn clear(&mut self) {
        *self = FamilyBuilder::new(self.family);
    }
}

/// A named pair of IP range sets, one per family.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    v4: FamilyBuilder,
    v6: FamilyBuilder,
}

impl Entry {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: normalize_name(name.as_ref()),
            v4: FamilyBuilder::new(AddressFamily::V4),
            v6: FamilyBuilder::new(AddressFamily::V6),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn builder(&self, family: AddressFamily) -> &FamilyBuilder {
        match family {
            AddressFamily::V4 => &self.v4,
            AddressFamily::V6 => &self.v6,
        }
    }

    fn builder_mut(&mut self, family: AddressFamily) -> &mut FamilyBuilder {
        match family {
            AddressFamily::V4 => &mut self.v4,
            AddressFamily::V6 => &mut self.v6,
        }
    }

    /// Adds one prefix in any accepted input shape.
    pub fn insert<'a>(&mut self, input: impl Into<PrefixInput<'a>>) -> Result<()> {
        let (prefix, _) = normalize(input.into())?;
        self.insert_range(prefix.range());
        Ok(())
    }

    /// Subtracts one prefix. Fails when the prefix's family holds nothing.
    pub fn remove<'a>(&mut self, input: impl Into<PrefixInput<'a>>) -> Result<()> {
        let (prefix, family) = normalize(input.into())?;
        if !self.builder(family).has_data() {
            return Err(GeoError::InvalidFamilyForOperation {
                entry: self.name.clone(),
                family,
            });
        }
        self.builder_mut(family).remove(prefix.range());
        Ok(())
    }

    /// Adds an arbitrary range, for sources that are not prefix-shaped.
    pub fn insert_range(&mut self, range: IpRange) {
        self.builder_mut(range.family()).insert(range);
    }

    /// Adds every range of a finalized set to this entry's batch.
    pub fn insert_set(&mut self, set: &IpRangeSet) {
        for range in set.ranges() {
            self.insert_range(range);
        }
    }

    /// Removes every range of a finalized set from this entry's batch.
    pub fn remove_set(&mut self, set: &IpRangeSet) {
        let builder = self.builder_mut(set.family());
        for range in set.ranges() {
            builder.remove(range);
        }
    }

    /// Folds both pending batches into their finalized sets.
    pub fn finalize(&mut self) {
        self.v4.finalize();
        self.v6.finalize();
    }

    /// Folds the pending batch of one family, leaving the other untouched.
    pub fn finalize_family(&mut self, family: AddressFamily) {
        self.builder_mut(family).finalize();
    }

    /// The finalized set for `family`, or `None` when it holds nothing.
    pub fn finalized(&self, family: AddressFamily) -> Option<Arc<IpRangeSet>> {
        self.builder(family).finalized()
    }

    pub fn v4_set(&self) -> Option<Arc<IpRangeSet>> {
        self.finalized(AddressFamily::V4)
    }

    pub fn v6_set(&self) -> Option<Arc<IpRangeSet>> {
        self.finalized(AddressFamily::V6)
    }

    pub fn has_family(&self, family: AddressFamily) -> bool {
        self.finalized(family).is_some()
    }

    pub fn has_v4(&self) -> bool {
        self.v4_set().is_some()
    }

    pub fn has_v6(&self) -> bool {
        self.v6_set().is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_v4() && !self.has_v6()
    }

    /// Drops everything accumulated for `family`.
    pub fn clear_family(&mut self, family: AddressFamily) {
        self.builder_mut(family).clear();
    }

    /// `true` when the whole prefix lies inside this entry.
    pub fn contains(&self, prefix: &Prefix) -> bool {
        self.finalized(prefix.family())
            .is_some_and(|set| set.contains_prefix(prefix))
    }

    fn sets(&self, ignore: IgnoreOption) -> Result<Vec<Arc<IpRangeSet>>> {
        let sets: Vec<_> = ignore.families().filter_map(|f| self.finalized(f)).collect();
        if sets.is_empty() {
            return Err(GeoError::EntryHasNoPrefix(self.name.clone()));
        }
        Ok(sets)
    }

    pub fn to_ranges(&self, ignore: IgnoreOption) -> Result<Vec<IpRange>> {
        Ok(self
            .sets(ignore)?
            .iter()
            .flat_map(|set| set.ranges().collect::<Vec<_>>())
            .collect())
    }

    /// Minimal CIDR list, IPv4 first, each family in address order.
    pub fn to_prefixes(&self, ignore: IgnoreOption) -> Result<Vec<Prefix>> {
        Ok(self.sets(ignore)?.iter().flat_map(|set| set.prefixes()).collect())
    }

    pub fn to_text(&self, ignore: IgnoreOption) -> Result<Vec<String>> {
        Ok(self
            .to_prefixes(ignore)?
            .iter()
            .map(|prefix| prefix.to_string())
            .collect())
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
