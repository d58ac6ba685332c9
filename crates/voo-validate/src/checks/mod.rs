//! Rule families, one module each.

pub mod completeness;
pub mod dependency;
pub mod format;
pub mod integrity;
pub mod logical;
pub mod outliers;
pub mod range;
pub mod temporal;

use polars::prelude::DataFrame;

use crate::context::ValidationContext;
use crate::result::RuleResults;
use crate::row_reader::RowReader;

pub fn run_all(df: &DataFrame, ctx: &ValidationContext<'_>) -> RuleResults {
    let span = tracing::info_span!("validate", rows = df.height(), columns = df.width());
    let _guard = span.enter();

    let reader = RowReader::new(df);
    let schema = ctx.schema;
    let mut results = RuleResults::default();

    results.extend(completeness::check(&reader));
    results.extend(temporal::check(&reader, ctx.reference_date));
    results.extend(logical::check(&reader, &schema.thresholds, &schema.vocabulary));
    results.extend(range::check(&reader, &schema.range_checks));
    results.extend(format::check(
        &reader,
        ctx.countries,
        &schema.vocabulary,
        &ctx.source_columns,
    ));
    results.extend(dependency::check(&reader, &schema.vocabulary));
    results.extend(outliers::check(&reader, &schema.outlier_checks));
    results.extend(integrity::check(&reader, &schema.thresholds, &schema.vocabulary));

    for set in results.flagged() {
        tracing::debug!(rule = %set.name, category = %set.category, rows = set.len(), "rule flagged rows");
    }
    tracing::info!(
        rules = results.len(),
        flagged_rules = results.flagged().count(),
        flagged_rows = results.total_flagged_rows(),
        "validation complete"
    );
    results
}
