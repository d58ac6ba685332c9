//! Error types for output generation.

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// Failed to write an output file.
    #[error("Failed to write {format} file '{path}': {message}")]
    WriteError {
        format: String,
        path: String,
        message: String,
    },

    /// The table does not fit in a worksheet.
    #[error("Table too large for a worksheet: {rows} rows x {columns} columns")]
    SheetTooLarge { rows: usize, columns: usize },

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a write error with format and path context.
    pub fn write_error(
        format: impl Into<String>,
        path: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        Self::WriteError {
            format: format.into(),
            path: path.into(),
            message: source.to_string(),
        }
    }
}
