use std::time::Instant;

use colored::*;
use geoset_common::config::Config;
use geoset_core::Container;
use geoset_plugins::{ConverterSpec, InputConverter, OutputConverter, Registry};

use crate::terminal::print;

pub async fn convert(
    registry: &Registry,
    input_specs: &[ConverterSpec],
    output_specs: &[ConverterSpec],
    cfg: &Config,
) -> anyhow::Result<()> {
    let inputs: Vec<Box<dyn InputConverter>> = input_specs
        .iter()
        .map(|spec| registry.build_input(spec, cfg))
        .collect::<anyhow::Result<_>>()?;
    let outputs: Vec<Box<dyn OutputConverter>> = output_specs
        .iter()
        .map(|spec| registry.build_output(spec, cfg))
        .collect::<anyhow::Result<_>>()?;

    let start_time: Instant = Instant::now();
    let container = Container::new();
    geoset_plugins::run(&inputs, &outputs, &container).await?;

    print::fat_separator(cfg.quiet);
    let entries: ColoredString = format!("{} entries", container.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    print::print_status(format!("Conversion complete: {entries} in {total_time}"));
    Ok(())
}
