//! CLI argument definitions for the HVF export converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hvf-to-csv",
    version,
    about = "Convert HVF XML data into parsable CSV output",
    long_about = "Convert Humphrey visual-field XML exports into one CSV row per exam.\n\n\
                  Exams without a complete threshold test, and rows whose columns\n\
                  differ from the first row, are written to an _errors.txt sidecar."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Prefix log lines with timestamps (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Allow patient identifiers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an XML export into CSV.
    Convert(ConvertArgs),

    /// Print the default export layout as JSON.
    Layout,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// XML export containing test data.
    #[arg(short = 'i', long = "input-file", value_name = "XML")]
    pub input_file: PathBuf,

    /// Where CSV output is written (default: <INPUT>_data.csv, `-` for stdout).
    #[arg(short = 'o', long = "output-file", value_name = "CSV")]
    pub output_file: Option<PathBuf>,

    /// Where rejected records are written (default: <OUTPUT or INPUT>_errors.txt).
    #[arg(long = "errors-file", value_name = "TXT")]
    pub errors_file: Option<PathBuf>,

    /// JSON file overriding element names of the export layout.
    #[arg(long = "layout", value_name = "JSON")]
    pub layout: Option<PathBuf>,

    /// Field delimiter for the CSV output.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,
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
