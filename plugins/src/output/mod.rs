pub mod stdout;
pub mod text;

use geoset_core::{Container, Entry};

/// Entries to write, sorted by name. An empty `want` selects everything.
pub(crate) fn selected_entries(container: &Container, want: &[String]) -> Vec<Entry> {
    let mut entries: Vec<Entry> = if want.is_empty() {
        container.entries().collect()
    } else {
        want.iter().filter_map(|name| container.get(name)).collect()
    };
    entries.sort_by(|a, b| a.name().cmp(b.name()));
    entries.dedup_by(|a, b| a.name() == b.name());
    entries
}
