//! VOO record cleaner CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use voo_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, SummaryFormatArg};
use crate::commands::{run_fields, run_pipeline};
use crate::summary::{print_summary, print_summary_json};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_pipeline(&args) {
            Ok(result) => {
                let printed = match args.summary_format {
                    SummaryFormatArg::Table => {
                        print_summary(&result);
                        Ok(())
                    }
                    SummaryFormatArg::Json => print_summary_json(&result),
                };
                if let Err(error) = printed {
                    eprintln!("error: {error:#}");
                    1
                } else if result.has_errors() {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Fields(args) => match run_fields(&args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Logging settings: `--log-level` wins over `-v`/`-q`, and either one
/// disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        with_ansi,
        ..LogConfig::default()
    }
    .with_level(explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
    .with_log_data(cli.log_data)
}
