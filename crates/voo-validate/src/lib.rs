//! Validation rules for consolidated VOO records.
//!
//! Every rule yields an [`ErrorSet`]: the rule name, its [`Category`] and the
//! indices of the offending rows in the validated table. Rules whose columns
//! are absent yield nothing, so a partial export never fails validation.
//!
//! - **Completeness**: mandatory fields, critical dates, species evidence
//! - **Temporal**: date ordering and dates in the future
//! - **Logical**: flags that contradict the measured values
//! - **Range**: physiologically impossible values
//! - **Format**: country names and yes/no answers
//! - **Dependency**: positive findings without the supporting test result
//! - **Outlier**: values outside the clinical reference interval
//! - **Medical integrity**: contradictory severity markers
//!
//! # Example
//!
//! ```ignore
//! use voo_validate::{ValidationContext, run_all};
//!
//! let ctx = ValidationContext::new(&schema, &countries, today);
//! let results = run_all(&df, &ctx);
//! for (rule, count) in results.counts() {
//!     println!("{rule}: {count}");
//! }
//! ```

mod category;
mod checks;
mod context;
mod dates;
mod result;
mod row_reader;

use polars::prelude::DataFrame;

pub use category::Category;
pub use checks::outliers::detect_outliers;
pub use context::ValidationContext;
pub use dates::parse_date;
pub use result::{ErrorSet, RuleResults};
pub use row_reader::RowReader;

/// Runs the whole rule battery against a consolidated table.
///
/// Rules run in a fixed order: completeness, temporal, logical, range, format,
/// dependency, outliers, medical integrity. The returned results keep that
/// order, including empty sets.
pub fn run_all(df: &DataFrame, ctx: &ValidationContext<'_>) -> RuleResults {
    checks::run_all(df, ctx)
}
