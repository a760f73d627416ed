//! Coronary angiography and PCI record analyzer.

use std::io::{self, IsTerminal};

use cag_cli::commands::{run_analyze, run_convert};
use cag_cli::logging::{LogConfig, LogFormat, init_logging};
use cag_cli::types::AnalyzeRequest;
use cag_model::DeriveOptions;
use cag_report::ReportOptions;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{AnalyzeArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_analysis, print_conversion};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Analyze(args) => match run_analyze(&analyze_request(args)) {
            Ok(result) => {
                print_analysis(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Convert(args) => match run_convert(&args.csv, &args.jsonl) {
            Ok(result) => {
                print_conversion(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn analyze_request(args: &AnalyzeArgs) -> AnalyzeRequest {
    AnalyzeRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        derive: DeriveOptions::new().with_parallel(args.parallel),
        report: ReportOptions::default().with_preview_rows(args.head),
    }
}

/// Explicit `--log-level` wins over `-v`/`-q`; either disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_timestamps = cli.log_timestamps;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
