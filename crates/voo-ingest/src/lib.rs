//! VOO export ingestion.
//!
//! This crate parses the raw CSV exports into Polars DataFrames, one frame per
//! file, without renaming or filtering columns.
//!
//! # Features
//!
//! - **Legacy encoding**: files are decoded with `encoding_rs` (latin-1 by default)
//! - **Fixed delimiter**: semicolon-separated by default
//! - **Missing values**: blank cells and the usual NA tokens become nulls
//! - **Header repair**: blank names become `Unnamed: <idx>`, duplicates get `.1`, `.2`
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use voo_ingest::{CsvOptions, read_csv_table};
//!
//! let df = read_csv_table(Path::new("export_hopital.csv"), &CsvOptions::default())?;
//! ```

mod error;
mod options;
mod source;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{
    MAX_CSV_FILE_SIZE, check_file_size_with_limit, normalize_headers, read_csv_from_reader,
    read_csv_table,
};
pub use options::{CsvOptions, DEFAULT_NA_VALUES};

// === Sources ===
pub use source::{SourceTable, read_sources};
