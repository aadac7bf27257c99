pub mod convert;
pub mod converters;
pub mod list;
pub mod lookup;

use clap::{Parser, Subcommand};
use geoset_common::config::Config;
use geoset_core::Container;
use geoset_plugins::{ConverterSpec, InputConverter, Registry};

#[derive(Parser)]
#[command(name = "geoset")]
#[command(about = "Convert, merge and query IP/CIDR lists.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print per-file progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only process IPv4 data
    #[arg(long, global = true, conflicts_with = "only_ipv6")]
    pub only_ipv4: bool,

    /// Only process IPv6 data
    #[arg(long, global = true)]
    pub only_ipv6: bool,

    /// Fail when a remove target does not exist
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every input, then write every output
    #[command(alias = "c")]
    Convert {
        /// Input converter, e.g. `text:./data` or `private`
        #[arg(short, long = "input", required = true)]
        inputs: Vec<ConverterSpec>,
        /// Output converter, e.g. `text:./out` or `stdout`
        #[arg(short, long = "output", required = true)]
        outputs: Vec<ConverterSpec>,
    },
    /// Find the entries that contain an IP or CIDR
    #[command(alias = "l")]
    Lookup {
        query: String,
        #[arg(short, long = "input", required = true)]
        inputs: Vec<ConverterSpec>,
        /// Restrict the search to these entries
        #[arg(short, long, value_delimiter = ',')]
        names: Vec<String>,
    },
    /// Show the loaded entries with their prefix counts
    List {
        #[arg(short, long = "input", required = true)]
        inputs: Vec<ConverterSpec>,
    },
    /// Show the available converter types
    Converters,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builds the input converters and runs them into a fresh container.
pub async fn load(registry: &Registry, specs: &[ConverterSpec], cfg: &Config) -> anyhow::Result<Container> {
    let inputs: Vec<Box<dyn InputConverter>> = specs
        .iter()
        .map(|spec| registry.build_input(spec, cfg))
        .collect::<anyhow::Result<_>>()?;

    let container = Container::new();
    geoset_plugins::run(&inputs, &[], &container).await?;
    Ok(container)
}
