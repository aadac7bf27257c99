use geoset_common::config::Config;
use geoset_common::network::family::AddressFamily;
use geoset_core::Entry;
use geoset_plugins::{ConverterSpec, Registry};

use crate::commands::load;
use crate::terminal::print;

pub async fn list(registry: &Registry, inputs: &[ConverterSpec], cfg: &Config) -> anyhow::Result<()> {
    let container = load(registry, inputs, cfg).await?;

    print::header("entries", cfg.quiet);
    let mut entries: Vec<Entry> = container.entries().collect();
    entries.sort_by(|a, b| a.name().cmp(b.name()));

    for entry in &entries {
        println!(
            "{}\tipv4={}\tipv6={}",
            entry.name(),
            prefix_count(entry, AddressFamily::V4),
            prefix_count(entry, AddressFamily::V6)
        );
    }
    Ok(())
}

fn prefix_count(entry: &Entry, family: AddressFamily) -> usize {
    entry
        .finalized(family)
        .map(|set| set.prefixes().len())
        .unwrap_or(0)
}
