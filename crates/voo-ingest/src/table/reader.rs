//! CSV file reading into string-typed Polars frames.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use polars::prelude::{Column, DataFrame};
use voo_common::string_column;

use crate::error::{IngestError, Result};
use crate::options::CsvOptions;

use super::header::normalize_headers;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a CSV export into a DataFrame.
///
/// Every column is a `String` column; missing cells are nulls. The file handle
/// is released before parsing starts.
pub fn read_csv_table(path: &Path, options: &CsvOptions) -> Result<DataFrame> {
    check_file_size_with_limit(path, options.max_file_size)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    read_csv_from_reader(file, path, options)
}

/// Reads CSV content from any reader; `source` names it in errors and logs.
pub fn read_csv_from_reader<R: Read>(
    mut reader: R,
    source: &Path,
    options: &CsvOptions,
) -> Result<DataFrame> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| IngestError::FileRead {
            path: source.to_path_buf(),
            source: e,
        })?;
    drop(reader);

    let text = decode(&bytes, options.encoding, source);
    parse_csv_text(&text, source, options)
}

fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding, source: &Path) -> Cow<'a, str> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if used != encoding {
        tracing::debug!(
            path = %source.display(),
            declared = encoding.name(),
            detected = used.name(),
            "byte order mark overrides declared encoding"
        );
    }
    if had_errors {
        tracing::warn!(
            path = %source.display(),
            encoding = used.name(),
            "malformed byte sequences replaced during decoding"
        );
    }
    text
}

fn parse_csv_text(text: &str, source: &Path, options: &CsvOptions) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers = reader
        .headers()
        .map_err(|e| csv_error(source, &e))?
        .clone();
    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }

    let headers = normalize_headers(raw_headers.iter());
    let width = headers.len();
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(source, &e))?;
        if record.len() > width {
            return Err(IngestError::RaggedRow {
                path: source.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }
        // Short rows are padded with missing cells.
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(record.get(idx).and_then(|raw| options.normalize_cell(raw)));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(values)
        .map(|(name, cells)| string_column(name, cells))
        .collect();
    let df = DataFrame::new(columns)?;

    tracing::debug!(
        path = %source.display(),
        rows = df.height(),
        columns = df.width(),
        "parsed CSV export"
    );
    Ok(df)
}

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

fn csv_error(path: &Path, e: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
