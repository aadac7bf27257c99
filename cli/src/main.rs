mod commands;
mod terminal;

use commands::{CommandLine, Commands, convert, converters, list, lookup};
use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_plugins::Registry;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet, commands.verbose);

    let cfg = Config {
        quiet: commands.quiet,
        only: IgnoreOption::from_only(commands.only_ipv4, commands.only_ipv6),
        strict: commands.strict,
    };
    let registry = Registry::with_defaults();

    match commands.command {
        Commands::Convert { inputs, outputs } => {
            print::header("starting conversion", cfg.quiet);
            convert::convert(&registry, &inputs, &outputs, &cfg).await
        }
        Commands::Lookup { query, inputs, names } => {
            lookup::lookup(&registry, &query, &inputs, &names, &cfg).await
        }
        Commands::List { inputs } => list::list(&registry, &inputs, &cfg).await,
        Commands::Converters => {
            converters::converters(&registry, cfg.quiet);
            Ok(())
        }
    }
}
