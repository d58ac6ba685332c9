//! Cleaned table export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use polars::prelude::DataFrame;
use voo_common::cell_text;

use crate::error::{ReportError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the table as comma-separated UTF-8 with a BOM.
///
/// Numbers are written without trailing zeros, missing cells as empty fields.
pub fn write_cleaned_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| ReportError::write_error("CSV", path.display().to_string(), e))?;
    write_cleaned_csv_to(df, BufWriter::new(file))?;
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "cleaned table written"
    );
    Ok(())
}

/// Same as [`write_cleaned_csv`], into any writer.
pub fn write_cleaned_csv_to<W: Write>(df: &DataFrame, mut out: W) -> Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut writer = WriterBuilder::new().delimiter(b',').from_writer(out);

    let columns = df.get_columns();
    writer.write_record(columns.iter().map(|column| column.name().as_str()))?;

    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for row in 0..df.height() {
        record.clear();
        record.extend(
            columns
                .iter()
                .map(|column| cell_text(column, row).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
