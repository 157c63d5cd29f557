use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use strum::Display;

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Align two sequences and write the five line report")]
    Align(AlignArgs),
    #[command(about = "Compute only the optimal alignment cost in linear space")]
    Cost(CostArgs),
}

#[derive(Parser)]
#[command(name = "hirsch")]
#[command(about = "Exact global pairwise alignment of two nucleotide sequences")]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
}

/// Which aligner produces the alignment.
#[derive(ValueEnum, Display, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Algorithm {
    /// Fill the full cost table, then backtrack
    Quadratic,
    /// Divide and conquer in linear space
    #[default]
    Hirschberg,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,

    /// Allow hirsch to overwrite files
    #[arg(short = 'q', long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,

    /// A JSON cost model to use in place of the default
    #[arg(short = 'c', long = "cost-model", value_name = "MODEL.json")]
    pub cost_model_path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Input file
    #[arg(value_name = "INPUT.[txt:fasta]")]
    pub input_path: PathBuf,

    /// Where to place the report
    #[arg(value_name = "OUTPUT")]
    pub output_path: PathBuf,

    /// The aligner to run
    #[arg(short = 'a', long = "algorithm", default_value_t = Algorithm::Hirschberg)]
    pub algorithm: Algorithm,

    /// Run the aligner this many times before the measured run
    #[arg(short = 'w', long = "warmup", default_value_t = 0usize, value_name = "N")]
    pub warmup: usize,

    /// Write the report as a JSON object
    #[arg(long, action)]
    pub json: bool,

    /// Print a human readable view of the alignment to stdout
    #[arg(long, action)]
    pub display: bool,

    /// Arguments that are common across all hirsch subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CostArgs {
    /// Input file
    #[arg(value_name = "INPUT.[txt:fasta]")]
    pub input_path: PathBuf,

    /// Arguments that are common across all hirsch subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}
