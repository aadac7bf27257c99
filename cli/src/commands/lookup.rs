use geoset_common::config::Config;
use geoset_plugins::{ConverterSpec, Registry};

use crate::commands::load;

/// Prints the comma-separated matching entry names, or `false`.
pub async fn lookup(
    registry: &Registry,
    query: &str,
    inputs: &[ConverterSpec],
    names: &[String],
    cfg: &Config,
) -> anyhow::Result<()> {
    let container = load(registry, inputs, cfg).await?;
    let (matched, found) = container.lookup(query, names)?;

    if found {
        println!("{}", matched.join(","));
    } else {
        println!("false");
    }
    Ok(())
}
