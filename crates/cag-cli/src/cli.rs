//! CLI argument definitions for the angiography analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cag-analyzer",
    version,
    about = "Derive lesion, vessel-disease and complex PCI fields from angiography reviews",
    long_about = "Derive clinical classification fields from coronary angiography and PCI reviews.\n\n\
                  Reads one JSON encounter per line, classifies lesions by segment,\n\
                  categorizes vessel disease and evaluates the complex PCI criteria."
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

    /// Include patient identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive summary fields for every encounter in a JSONL file.
    Analyze(AnalyzeArgs),

    /// Convert a CSV export into JSONL input.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Line-delimited JSON file, one encounter per line.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the derived table as CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of derived rows to preview.
    #[arg(long = "head", value_name = "N", default_value_t = 20)]
    pub head: usize,

    /// Derive encounters on a thread pool.
    #[arg(long = "parallel")]
    pub parallel: bool,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Destination JSONL file.
    #[arg(value_name = "JSONL")]
    pub jsonl: PathBuf,
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
