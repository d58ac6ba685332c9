//! Physiologically impossible values.

use voo_model::BoundCheck;

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

/// One set per configured check whose column exists. Missing and non-numeric
/// values are never flagged here.
pub fn check(reader: &RowReader<'_>, checks: &[BoundCheck]) -> Vec<ErrorSet> {
    checks
        .iter()
        .filter(|check| reader.has_column(&check.field))
        .map(|check| {
            ErrorSet::new(
                check.rule.clone(),
                Category::Range,
                reader.rows_outside(&check.field, &check.bounds),
            )
        })
        .collect()
}
