//! Spreadsheet error report.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame, DataType};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use voo_common::{any_to_f64, any_to_string, is_missing};
use voo_validate::RuleResults;

use crate::error::{ReportError, Result};
use crate::sheet::SheetNames;

/// Column limit of a worksheet.
const MAX_COLUMNS: usize = 16_384;
/// Row limit of a worksheet, header row included.
const MAX_ROWS: usize = 1_048_576;

/// Writes one worksheet per rule that flagged rows.
///
/// Each sheet holds the offending rows of `df` with every column, under a
/// bold frozen header. Numeric columns are written as numbers, everything else
/// as text; missing cells stay blank.
///
/// Returns `Ok(None)` when no rule flagged anything. A report left at `path`
/// by an earlier run is then deleted.
pub fn write_error_report(
    df: &DataFrame,
    results: &RuleResults,
    path: &Path,
) -> Result<Option<PathBuf>> {
    if results.flagged().next().is_none() {
        remove_stale_report(path)?;
        tracing::info!("no rule flagged any row, report not written");
        return Ok(None);
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let mut names = SheetNames::new();

    for set in results.flagged() {
        let rows = set.frame(df)?;
        let name = names.assign(&set.name);
        let worksheet = workbook.add_worksheet().set_name(&name)?;
        write_sheet(worksheet, &rows, &header)?;
        tracing::debug!(rule = %set.name, sheet = %name, rows = rows.height(), "report sheet written");
    }

    workbook
        .save(path)
        .map_err(|e| ReportError::write_error("XLSX", path.display().to_string(), e))?;

    tracing::info!(
        path = %path.display(),
        sheets = results.flagged().count(),
        "error report written"
    );
    Ok(Some(path.to_path_buf()))
}

fn remove_stale_report(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "previous error report removed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReportError::write_error("XLSX", path.display().to_string(), e)),
    }
}

fn write_sheet(worksheet: &mut Worksheet, df: &DataFrame, header: &Format) -> Result<()> {
    if df.width() > MAX_COLUMNS || df.height() >= MAX_ROWS {
        return Err(ReportError::SheetTooLarge {
            rows: df.height(),
            columns: df.width(),
        });
    }

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        // Bounds checked above.
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, column.name().as_str(), header)?;

        let numeric = is_numeric(column.dtype());
        for row_idx in 0..df.height() {
            let value = column.get(row_idx).unwrap_or(AnyValue::Null);
            if is_missing(&value) {
                continue;
            }
            let row = row_idx as u32 + 1;
            match any_to_f64(value.clone()) {
                Some(number) if numeric => {
                    worksheet.write_number(row, col, number)?;
                }
                _ => {
                    worksheet.write_string(row, col, any_to_string(value))?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}
