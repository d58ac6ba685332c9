//! Values outside the clinical reference interval.

use polars::prelude::DataFrame;
use voo_model::{BoundCheck, Bounds};

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

/// Rows of `column` with a numeric value outside `bounds`.
///
/// Non-numeric and missing cells are excluded from the result entirely.
/// Returns `None` when the column does not exist.
pub fn detect_outliers(df: &DataFrame, column: &str, bounds: &Bounds) -> Option<Vec<usize>> {
    let reader = RowReader::new(df);
    reader
        .has_column(column)
        .then(|| reader.rows_outside(column, bounds))
}

pub fn check(reader: &RowReader<'_>, checks: &[BoundCheck]) -> Vec<ErrorSet> {
    checks
        .iter()
        .filter_map(|check| {
            let rows = detect_outliers(reader.frame(), &check.field, &check.bounds)?;
            Some(ErrorSet::new(check.rule.clone(), Category::Outlier, rows))
        })
        .collect()
}
