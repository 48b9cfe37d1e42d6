//! CLI argument definitions for the label generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bbfacts_model::{DEFAULT_CHARGE_NAME_LIMIT, DEFAULT_LABEL_TITLE};

#[derive(Parser)]
#[command(
    name = "bbfacts",
    version,
    about = "Broadband Facts label generator",
    long_about = "Generate Broadband Facts consumer labels from a CSV of plans.\n\n\
                  Each data row is validated, then rendered as one SVG label.\n\
                  The labels are packaged into a ZIP archive."
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

    /// Log output format.
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
    /// Validate the CSV and write one SVG label per row.
    Generate(GenerateArgs),

    /// Validate the CSV without generating labels.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// CSV file with one plan per row.
    #[arg(long = "input-csv", value_name = "PATH", default_value = "bcd.csv")]
    pub input_csv: PathBuf,

    /// Directory the labels and archive are written to.
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = "./generated-labels"
    )]
    pub output_dir: PathBuf,

    /// Archive file name (`.zip` is appended when missing).
    #[arg(
        long = "archive-name",
        value_name = "NAME",
        default_value = "broadband-labels.zip"
    )]
    pub archive_name: String,

    /// Skip packaging the labels into an archive.
    #[arg(long = "no-archive")]
    pub no_archive: bool,

    /// Validate and derive labels without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Longest additional charge name shown before it is shortened.
    #[arg(long = "charge-name-limit", value_name = "CHARS", default_value_t = DEFAULT_CHARGE_NAME_LIMIT)]
    pub charge_name_limit: usize,

    /// Heading drawn at the top of each label.
    #[arg(long = "title", value_name = "TEXT", default_value = DEFAULT_LABEL_TITLE)]
    pub title: String,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV file with one plan per row.
    #[arg(long = "input-csv", value_name = "PATH", default_value = "bcd.csv")]
    pub input_csv: PathBuf,
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
