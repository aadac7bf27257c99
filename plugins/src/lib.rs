//! Format converters that fill or drain a [`Container`].
//!
//! Converters are built from textual [`ConverterSpec`]s through an explicit
//! [`Registry`], then run by [`run`]: every input in order, then every
//! output.

pub mod converter;
pub mod input;
pub mod lines;
pub mod output;
pub mod registry;
pub mod spec;

use tracing::info;

use geoset_core::Container;

pub use converter::{InputConverter, OutputConverter};
pub use registry::Registry;
pub use spec::ConverterSpec;

/// Runs a conversion job against `container`.
pub async fn run(
    inputs: &[Box<dyn InputConverter>],
    outputs: &[Box<dyn OutputConverter>],
    container: &Container,
) -> anyhow::Result<()> {
    for input in inputs {
        input.input(container).await?;
        info!("{} input ({}) done, {} entries loaded", input.type_name(), input.action(), container.len());
    }

    for output in outputs {
        output.output(container).await?;
        info!("{} output done", output.type_name());
    }

    Ok(())
}
