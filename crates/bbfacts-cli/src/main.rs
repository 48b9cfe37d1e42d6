//! Broadband Facts label generator CLI.

use std::io::{self, IsTerminal};

use bbfacts_cli::logging::{LogConfig, LogFormat, init_logging};
use bbfacts_model::{ErrorReport, RowError};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{check, generate};
use crate::summary::{print_check_summary, print_generate_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Generate(args) => match generate(args) {
            Ok(result) => {
                print_generate_summary(&result);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Check(args) => match check(args) {
            Ok(result) => {
                print_check_summary(&result);
                0
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

/// Data errors are printed as a JSON report, anything else as plain text.
fn report_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<RowError>() {
        Some(row_error) => match ErrorReport::from(row_error).to_json() {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("error: {error:#}"),
        },
        None => eprintln!("error: {error:#}"),
    }
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
