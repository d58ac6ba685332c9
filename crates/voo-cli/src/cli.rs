//! CLI argument definitions for the VOO record cleaner.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;
use voo_cli::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "voo-clean",
    version,
    about = "Merge, deduplicate and validate VOO malaria exports",
    long_about = "Merge up to four VOO malaria CSV exports into one table keyed by the\n\
                  patient identifier, then run the validation rules.\n\n\
                  Writes the cleaned table as CSV and one spreadsheet sheet per rule\n\
                  that flagged at least one row."
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

    /// Allow patient identifiers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge the exports, validate them and write the outputs.
    Run(RunArgs),

    /// List the schema fields and the bound checks.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV exports, in priority order (1 to 4 files).
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Directory receiving the outputs.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// File name of the cleaned table.
    #[arg(long = "cleaned", value_name = "NAME", default_value = "donnees_nettoyees.csv")]
    pub cleaned: String,

    /// File name of the error report.
    #[arg(long = "report", value_name = "NAME", default_value = "rapport_erreurs_voo.xlsx")]
    pub report: String,

    /// TOML file overriding the default schema.
    #[arg(long = "schema", value_name = "TOML")]
    pub schema: Option<PathBuf>,

    /// Newline-separated list of valid country names.
    #[arg(long = "countries", value_name = "FILE")]
    pub countries: Option<PathBuf>,

    /// Identifier column used for deduplication (overrides the schema).
    #[arg(long = "identifier", value_name = "COL")]
    pub identifier: Option<String>,

    /// Field delimiter of the exports.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ';')]
    pub delimiter: char,

    /// Text encoding of the exports.
    #[arg(long = "encoding", value_name = "LABEL", default_value = "latin1")]
    pub encoding: String,

    /// Day used to detect future dates (default: today).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,

    /// Number of consolidated rows to print.
    #[arg(long = "preview", value_name = "N", default_value_t = 5)]
    pub preview: usize,

    /// Format of the rule summary on stdout.
    #[arg(long = "summary-format", value_enum, default_value = "table")]
    pub summary_format: SummaryFormatArg,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// TOML file overriding the default schema.
    #[arg(long = "schema", value_name = "TOML")]
    pub schema: Option<PathBuf>,
}

/// Summary output choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormatArg {
    Table,
    Json,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
