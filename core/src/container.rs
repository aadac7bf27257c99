//! # Container
//!
//! The name-keyed registry of [`Entry`] values shared by every converter of
//! one conversion job. Names are normalized on the way in, so lookups are
//! case- and whitespace-insensitive.
//!
//! All operations take `&self`; the map sits behind an [`RwLock`] so a
//! container can be shared across threads. Each mutation holds the write
//! lock for its whole duration, which makes it atomic per entry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use geoset_common::error::{GeoError, Result};
use geoset_common::network::family::{AddressFamily, IgnoreOption};
use geoset_common::network::prefix::{PrefixInput, normalize};

use crate::entry::{Entry, normalize_name};

/// What happens to an entry that a scoped removal leaves empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    #[default]
    Delete,
    Keep,
}

/// Which part of an entry a removal targets.
#[derive(Debug, Clone)]
pub enum RemoveScope {
    /// The whole entry (or the whole non-ignored family).
    Whole,
    /// Only the addresses held by the given entry.
    Prefixes(Entry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Modified,
    Deleted,
}

#[derive(Debug, Default)]
pub struct Container {
    entries: RwLock<HashMap<String, Entry>>,
    empty_policy: EmptyPolicy,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_policy(empty_policy: EmptyPolicy) -> Self {
        Self {
            entries: RwLock::default(),
            empty_policy,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a copy of the entry stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Entry> {
        self.read().get(&normalize_name(name)).cloned()
    }

    /// Stores `entry`, or unions it into the entry already under its name.
    ///
    /// The family named by `ignore` is dropped from a new entry and left
    /// untouched on an existing one.
    pub fn add(&self, mut entry: Entry, ignore: IgnoreOption) -> Result<()> {
        if entry.name().is_empty() {
            return Err(GeoError::InvalidEntryName(entry.name().to_string()));
        }
        entry.finalize();

        let mut entries = self.write();
        match entries.get_mut(entry.name()) {
            Some(existing) => {
                for family in ignore.families() {
                    if let Some(set) = entry.finalized(family) {
                        existing.insert_set(&set);
                    }
                }
                debug!("merged into existing entry {}", existing.name());
            }
            None => {
                drop_ignored(&mut entry, ignore);
                debug!("added entry {}", entry.name());
                entries.insert(entry.name().to_string(), entry);
            }
        }
        Ok(())
    }

    /// Overwrites whatever is stored under `entry`'s name.
    pub fn replace(&self, mut entry: Entry, ignore: IgnoreOption) -> Result<()> {
        if entry.name().is_empty() {
            return Err(GeoError::InvalidEntryName(entry.name().to_string()));
        }
        entry.finalize();
        drop_ignored(&mut entry, ignore);
        self.write().insert(entry.name().to_string(), entry);
        Ok(())
    }

    /// Deletes or shrinks the entry stored under `name`.
    ///
    /// `scope` picks whole-entry deletion or subtraction of a prefix set;
    /// the family named by `ignore` is exempt either way. A missing entry is
    /// reported as [`GeoError::EntryNotFound`]; callers usually log it and
    /// continue.
    pub fn remove(&self, name: &str, scope: RemoveScope, ignore: IgnoreOption) -> Result<RemoveOutcome> {
        let key = normalize_name(name);
        let mut entries = self.write();

        if matches!(scope, RemoveScope::Whole) && ignore == IgnoreOption::None {
            return entries
                .remove(&key)
                .map(|_| RemoveOutcome::Deleted)
                .ok_or_else(|| GeoError::EntryNotFound(key));
        }

        let Some(existing) = entries.get_mut(&key) else {
            return Err(GeoError::EntryNotFound(key));
        };

        match scope {
            RemoveScope::Whole => {
                for family in ignore.families() {
                    existing.clear_family(family);
                }
            }
            RemoveScope::Prefixes(mut cut) => {
                cut.finalize();
                existing.finalize();
                for family in ignore.families() {
                    if let Some(set) = cut.finalized(family) {
                        existing.remove_set(&set);
                    }
                }
                existing.finalize();
            }
        }

        if existing.is_empty() && self.empty_policy == EmptyPolicy::Delete {
            entries.remove(&key);
            debug!("removed emptied entry {key}");
            return Ok(RemoveOutcome::Deleted);
        }
        Ok(RemoveOutcome::Modified)
    }

    /// Iterates over a snapshot of every entry, in unspecified order.
    ///
    /// The snapshot is taken under a brief read lock; later mutations are
    /// not reflected.
    pub fn entries(&self) -> std::vec::IntoIter<Entry> {
        let snapshot: Vec<Entry> = self.read().values().cloned().collect();
        snapshot.into_iter()
    }

    /// All entry names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Finds the entries containing an address or a whole CIDR.
    ///
    /// With `candidates` given, only those entries are checked and unknown
    /// names are ignored. Returns the sorted matching names and whether
    /// there was any match.
    pub fn lookup<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Result<(Vec<String>, bool)> {
        let (prefix, family) = normalize(PrefixInput::Text(query))?;
        let entries = self.read();

        let contains = |entry: &Entry| {
            entry
                .finalized(family)
                .is_some_and(|set| set.contains_prefix(&prefix))
        };

        let mut matched: Vec<String> = if candidates.is_empty() {
            entries
                .values()
                .filter(|entry| contains(entry))
                .map(|entry| entry.name().to_string())
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|name| entries.get(&normalize_name(name.as_ref())))
                .filter(|entry| contains(entry))
                .map(|entry| entry.name().to_string())
                .collect()
        };
        matched.sort();
        matched.dedup();

        let found = !matched.is_empty();
        Ok((matched, found))
    }
}

fn drop_ignored(entry: &mut Entry, ignore: IgnoreOption) {
    for family in AddressFamily::ALL {
        if ignore.skips(family) {
            entry.clear_family(family);
        }
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
