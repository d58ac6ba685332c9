//! Output files of the VOO pipeline.
//!
//! - **Cleaned table**: comma-separated UTF-8 CSV with a BOM, readable by
//!   spreadsheet software without an import wizard
//! - **Error report**: one `.xlsx` worksheet per rule that flagged rows

mod cleaned;
mod error;
mod sheet;
mod workbook;

pub use cleaned::{write_cleaned_csv, write_cleaned_csv_to};
pub use error::{ReportError, Result};
pub use sheet::{MAX_SHEET_NAME_CHARS, SheetNames, sanitize_sheet_name};
pub use workbook::write_error_report;
