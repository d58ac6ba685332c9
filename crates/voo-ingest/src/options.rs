//! Parsing options for the exports.

use std::collections::BTreeSet;

use encoding_rs::Encoding;

use crate::error::{IngestError, Result};
use crate::table::MAX_CSV_FILE_SIZE;

/// Tokens read as missing values, in addition to blank cells.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How a raw export is decoded and split into cells.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Text encoding of the file. A byte order mark overrides it.
    pub encoding: &'static Encoding,
    /// Cell values (after trimming) treated as missing.
    pub na_values: BTreeSet<String>,
    /// Files above this size are rejected before reading.
    pub max_file_size: u64,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            encoding: encoding_rs::WINDOWS_1252,
            na_values: DEFAULT_NA_VALUES.iter().map(|v| (*v).to_string()).collect(),
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl CsvOptions {
    /// Sets the delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Resolves an encoding label such as `latin1`, `cp1252` or `utf-8`.
    pub fn with_encoding_label(mut self, label: &str) -> Result<Self> {
        self.encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            IngestError::UnsupportedEncoding {
                label: label.to_string(),
            }
        })?;
        Ok(self)
    }

    /// Sets the size limit.
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Normalizes one raw cell: blank and NA tokens become `None`.
    pub fn normalize_cell(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.na_values.contains(trimmed) {
            None
        } else {
            Some(raw.to_string())
        }
    }
}
