//! Error types for VOO export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the exports.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File access ===
    #[error("export not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read export {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, above the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Decoding ===
    /// Encoding label not recognized by `encoding_rs`.
    #[error("unsupported encoding label '{label}'")]
    UnsupportedEncoding { label: String },

    // === Parsing ===
    /// The `csv` reader rejected the content.
    #[error("malformed CSV in {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A data row has more fields than the header.
    #[error("{path}, line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// No header row, or only blank header names.
    #[error("export {path} has no header row")]
    EmptyCsv { path: PathBuf },

    /// Building the Polars table failed.
    #[error("cannot build table: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
