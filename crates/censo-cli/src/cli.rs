//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "censo-etl",
    version,
    about = "Normalize yearly school-census releases into a partitioned Parquet store",
    long_about = "Normalize the yearly school-census releases (2016-2022) into \
                  year-partitioned Parquet datasets.\n\n\
                  Each indicator workbook and microdados CSV is reconciled into one \
                  stable typed schema; cells with unpublished source files are skipped, \
                  cells with schema drift fail loudly, and the batch always runs to the end."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

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
    /// Run the batch over the raw archives and write the partitioned store.
    Run(RunArgs),

    /// List the indicators the mapping registry declares.
    Indicators,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Root directory of the extracted raw archives.
    #[arg(long = "data-root", value_name = "DIR")]
    pub data_root: PathBuf,

    /// Output directory for the partitioned datasets.
    #[arg(long = "output-root", value_name = "DIR")]
    pub output_root: PathBuf,

    /// First census year to process.
    #[arg(long = "from-year", default_value_t = 2016)]
    pub from_year: i32,

    /// Last census year to process.
    #[arg(long = "to-year", default_value_t = 2022)]
    pub to_year: i32,

    /// Process only these indicator codes (comma-separated, e.g. AFD,IED).
    #[arg(long = "only", value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Skip the microdados dataset.
    #[arg(long = "skip-microdados")]
    pub skip_microdados: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
