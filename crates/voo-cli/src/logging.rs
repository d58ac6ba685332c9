//! Logging setup on top of `tracing` and `tracing-subscriber`.
//!
//! Every pipeline stage runs inside a span, so the same events read as a
//! human log on the terminal or as JSON lines in a file.
//!
//! Levels used by the workspace crates:
//! - `error`: outputs that could not be written
//! - `warn`: decoding problems, exports without an identifier column
//! - `info`: stage progress and summary counts
//! - `debug`: per-file and per-rule counts
//! - `trace`: patient identifiers of flagged rows, redacted unless `--log-data`
//!
//! ```ignore
//! use voo_cli::logging::{LogConfig, init_logging};
//!
//! init_logging(&LogConfig::default())?;
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static PATIENT_DATA: AtomicBool = AtomicBool::new(false);

/// Logged in place of patient identifiers unless `--log-data` is given.
pub const REDACTED_VALUE: &str = "[REDACTED]";

const WORKSPACE_CRATES: &[&str] = &[
    "voo_cli",
    "voo_common",
    "voo_ingest",
    "voo_model",
    "voo_report",
    "voo_transform",
    "voo_validate",
];

pub fn log_data_enabled() -> bool {
    PATIENT_DATA.load(Ordering::Relaxed)
}

/// `value` itself when patient data may be logged, [`REDACTED_VALUE`] otherwise.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, for reading on a terminal.
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, span closes included.
    Json,
}

/// How the global subscriber is built.
///
/// Terminal output carries no timestamps; a log file always does.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level of the workspace crates. Other crates stay at `warn`.
    pub level_filter: LevelFilter,
    /// Use `RUST_LOG` when it is set.
    pub use_env_filter: bool,
    pub format: LogFormat,
    pub with_ansi: bool,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
    pub log_data: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            format: LogFormat::Pretty,
            with_ansi: true,
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(self, level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            ..self
        }
    }

    #[must_use]
    pub fn with_format(self, format: LogFormat) -> Self {
        Self { format, ..self }
    }

    #[must_use]
    pub fn with_log_file(self, log_file: Option<PathBuf>) -> Self {
        Self { log_file, ..self }
    }

    #[must_use]
    pub fn with_log_data(self, log_data: bool) -> Self {
        Self { log_data, ..self }
    }

    fn timestamps(&self) -> bool {
        self.log_file.is_some()
    }
}

/// Installs the global subscriber. Call once, before the first event.
///
/// # Errors
///
/// Fails when the log file cannot be opened for appending.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Installs the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    PATIENT_DATA.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(output_layer(config, writer))
        .with(build_env_filter(config.level_filter, config.use_env_filter))
        .init();
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn output_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, config.timestamps()) {
        (LogFormat::Json, _) => base.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Workspace crates at `level`, everything else at `warn`.
fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(WORKSPACE_CRATES.iter().map(|name| format!("{name}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    if use_env && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}
