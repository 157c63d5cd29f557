mod align;
mod args;
mod instrument;
mod io;
mod report;
mod util;

use args::{Cli, SubCommands};
use util::init_logger;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    match Cli::parse().command {
        SubCommands::Align(args) => {
            init_logger(args.common_args.verbosity);
            align::align(&args)?;
        }
        SubCommands::Cost(args) => {
            init_logger(args.common_args.verbosity);
            align::cost(&args)?;
        }
    }
    Ok(())
}
