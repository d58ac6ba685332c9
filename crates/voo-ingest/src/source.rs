//! Reading a set of exports in ingestion order.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::options::CsvOptions;
use crate::table::read_csv_table;

/// One parsed export together with where it came from.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub frame: DataFrame,
}

impl SourceTable {
    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| self.path.display().to_string(), str::to_string)
    }
}

/// Reads every path in order. The first failure aborts the whole read.
pub fn read_sources<P: AsRef<Path>>(paths: &[P], options: &CsvOptions) -> Result<Vec<SourceTable>> {
    let mut sources = Vec::with_capacity(paths.len());
    for (idx, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let frame = read_csv_table(path, options)?;
        tracing::info!(
            file_index = idx + 1,
            path = %path.display(),
            rows = frame.height(),
            columns = frame.width(),
            "loaded export"
        );
        sources.push(SourceTable {
            path: path.to_path_buf(),
            frame,
        });
    }
    Ok(sources)
}
