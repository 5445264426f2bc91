//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use td_ingest::DatasetKind;

#[derive(Parser)]
#[command(
    name = "tddata",
    version,
    about = "Tesouro Direto open-data toolkit",
    long_about = "Browse versioned Tesouro Direto data snapshots and normalize the\n\
                  published CSV exports into a uniform schema."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the supported datasets and how their snapshots resolve.
    Datasets,

    /// Show the newest snapshot of each dataset in a data directory.
    Latest(DirArgs),

    /// Normalize one dataset and print a summary (or the full table as JSON).
    Read(ReadArgs),

    /// Try to normalize every dataset, reporting failures without aborting.
    Check(DirArgs),
}

#[derive(Parser)]
pub struct DirArgs {
    /// Directory holding the downloaded snapshots.
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(Parser)]
pub struct ReadArgs {
    /// Dataset to read.
    #[arg(value_name = "DATASET")]
    pub dataset: DatasetKind,

    #[command(flatten)]
    pub dir: DirArgs,

    /// Concatenate all snapshots instead of reading only the newest one.
    /// Datasets whose history lives across snapshots (investors,
    /// operations) do this by default.
    #[arg(long = "history")]
    pub history: bool,

    /// Print the normalized table as JSON instead of a summary.
    #[arg(long = "json")]
    pub json: bool,

    /// Number of preview rows in the summary output.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
