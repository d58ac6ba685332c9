//! Record consolidation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: read every export into a string table
//! 2. **Deduplicate**: keep the most complete row per identifier in each file
//! 3. **Namespace**: prefix every non-identifier column with its file tag
//! 4. **Stack**: concatenate the files over the union of their columns
//! 5. **Canonicalize**: coalesce the per-file variants into the target columns
//! 6. **Merge**: one row per identifier across files, canonical columns rebuilt
//!    from the per-file columns in file order
//! 7. **Coerce**: numeric target columns to `f64`
//! 8. **Validate**: run the rule battery
//!
//! Writing the outputs is a separate step ([`write_outputs`]) so a caller can
//! inspect the consolidated table before anything touches the disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use voo_common::cell_text;
use voo_ingest::{CsvOptions, read_sources};
use voo_model::{CountryLookup, Schema};
use voo_report::{write_cleaned_csv, write_error_report};
use voo_transform::{
    canonicalize, coerce_numeric, keep_most_complete, merge_duplicates, namespace_tables,
    rebuild_canonical, stack_tables,
};
use voo_validate::{RuleResults, ValidationContext, run_all};

use crate::logging::{log_data_enabled, redact_value};

/// Largest number of exports accepted in one run.
pub const MAX_INPUT_FILES: usize = 4;

/// Default file name of the cleaned table.
pub const DEFAULT_CLEANED_NAME: &str = "donnees_nettoyees.csv";

/// Default file name of the error report.
pub const DEFAULT_REPORT_NAME: &str = "rapport_erreurs_voo.xlsx";

/// Identifiers logged per rule at trace level.
const TRACE_SAMPLE: usize = 5;

/// Settings shared by every stage.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub csv: CsvOptions,
    pub max_files: usize,
    /// Dates after this day are reported as future dates.
    pub reference_date: NaiveDate,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            max_files: MAX_INPUT_FILES,
            reference_date: chrono::Local::now().date_naive(),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_csv(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }

    #[must_use]
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }
}

/// Counts for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    /// Rows collapsed by the intra-file deduplication.
    pub duplicates_dropped: usize,
}

/// Counts collected while consolidating.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub files: Vec<FileStats>,
    pub stacked_rows: usize,
    /// Rows merged into another file's row with the same identifier.
    pub cross_file_duplicates: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    /// Non-missing cells of numeric columns that could not be read as numbers.
    pub non_numeric_values: usize,
}

/// Consolidated table and the rule results computed on it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: DataFrame,
    pub results: RuleResults,
    pub stats: PipelineStats,
    /// Prefixed per-file columns of `table`.
    pub source_columns: BTreeSet<String>,
}

/// Reads the exports at `paths` and consolidates them.
///
/// # Errors
///
/// Fails when the number of files is outside `1..=max_files`, when a file
/// cannot be read or parsed, or when the schema is inconsistent.
pub fn clean_and_validate<P: AsRef<Path>>(
    paths: &[P],
    schema: &Schema,
    countries: &dyn CountryLookup,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    check_file_count(paths.len(), options.max_files)?;

    let sources = info_span!("ingest", files = paths.len())
        .in_scope(|| read_sources(paths, &options.csv))
        .context("read exports")?;

    let tables: Vec<DataFrame> = sources.iter().map(|s| s.frame.clone()).collect();
    let mut output = process_tables(&tables, schema, countries, options)?;
    for (stats, source) in output.stats.files.iter_mut().zip(&sources) {
        stats.source = source.display_name();
    }
    Ok(output)
}

/// Consolidates tables already in memory, in ingestion order.
///
/// # Errors
///
/// Fails on a bad file count, an inconsistent schema, or a failing table
/// operation.
pub fn process_tables(
    tables: &[DataFrame],
    schema: &Schema,
    countries: &dyn CountryLookup,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    check_file_count(tables.len(), options.max_files)?;
    schema.validate().context("invalid schema")?;

    let start = Instant::now();
    let identifier = schema.identifier.as_str();
    let mut stats = PipelineStats::default();

    let deduped = info_span!("dedupe").in_scope(|| -> Result<Vec<DataFrame>> {
        let mut deduped = Vec::with_capacity(tables.len());
        for (idx, df) in tables.iter().enumerate() {
            let outcome = keep_most_complete(df, &[identifier])
                .with_context(|| format!("deduplicate file {}", idx + 1))?;
            debug!(
                file_index = idx + 1,
                rows = df.height(),
                dropped = outcome.dropped,
                "deduplicated export"
            );
            stats.files.push(FileStats {
                source: format!("file {}", idx + 1),
                rows: df.height(),
                columns: df.width(),
                duplicates_dropped: outcome.dropped,
            });
            deduped.push(outcome.frame);
        }
        Ok(deduped)
    })?;

    let (table, source_columns) = info_span!("consolidate").in_scope(|| -> Result<_> {
        let (namespaced, map) =
            namespace_tables(&deduped, &[identifier]).context("namespace columns")?;
        let stacked = stack_tables(&namespaced).context("stack exports")?;
        stats.stacked_rows = stacked.height();

        let targets = schema.target_columns();
        let canonical =
            canonicalize(&stacked, &targets, &map).context("build canonical columns")?;
        let merged = merge_duplicates(&canonical, &[identifier]).context("merge exports")?;
        stats.cross_file_duplicates = merged.dropped;
        let merged = rebuild_canonical(&merged.frame, &targets, &map)
            .context("rebuild canonical columns")?;

        let (coerced, summaries) =
            coerce_numeric(&merged, &schema.numeric_columns()).context("coerce numbers")?;
        for summary in summaries.iter().filter(|s| s.invalid > 0) {
            debug!(
                column = %summary.column,
                invalid = summary.invalid,
                "non-numeric values set to missing"
            );
        }
        stats.non_numeric_values = summaries.iter().map(|s| s.invalid).sum();
        Ok((coerced, map.source_columns()))
    })?;
    stats.final_rows = table.height();
    stats.final_columns = table.width();

    let ctx = ValidationContext::new(schema, countries, options.reference_date)
        .with_source_columns(source_columns.clone());
    let results = run_all(&table, &ctx);
    trace_flagged_identifiers(&table, &results, identifier);

    info!(
        files = stats.files.len(),
        stacked_rows = stats.stacked_rows,
        final_rows = stats.final_rows,
        flagged_rows = results.total_flagged_rows(),
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );

    Ok(PipelineOutput {
        table,
        results,
        stats,
        source_columns,
    })
}

fn check_file_count(count: usize, max_files: usize) -> Result<()> {
    if count == 0 {
        bail!("no input file given");
    }
    if count > max_files {
        bail!("{count} input files given, at most {max_files} are accepted");
    }
    Ok(())
}

fn trace_flagged_identifiers(table: &DataFrame, results: &RuleResults, identifier: &str) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let Ok(ids) = table.column(identifier) else {
        return;
    };
    for set in results.flagged() {
        let sample: Vec<String> = set
            .rows
            .iter()
            .take(TRACE_SAMPLE)
            .filter_map(|&row| cell_text(ids, row))
            .map(|id| redact_value(&id).to_string())
            .collect();
        trace!(
            rule = %set.name,
            identifiers = ?sample,
            redacted = !log_data_enabled(),
            "flagged rows"
        );
    }
}

/// Where the outputs are written.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub cleaned_name: String,
    pub report_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            cleaned_name: DEFAULT_CLEANED_NAME.to_string(),
            report_name: DEFAULT_REPORT_NAME.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_name)
    }
}

/// Outcome of each output. One failing does not prevent the other.
#[derive(Debug)]
pub struct WrittenOutputs {
    pub cleaned: Result<PathBuf>,
    /// `Ok(None)` when no rule flagged any row; a previous report is removed.
    pub report: Result<Option<PathBuf>>,
}

/// Writes the cleaned table and the error report.
pub fn write_outputs(output: &PipelineOutput, config: &OutputConfig) -> WrittenOutputs {
    let _span = info_span!("output", dir = %config.output_dir.display()).entered();

    let cleaned = prepare_dir(&config.output_dir).and_then(|()| {
        let path = config.cleaned_path();
        write_cleaned_csv(&output.table, &path)
            .with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    });

    let report = prepare_dir(&config.output_dir).and_then(|()| {
        let path = config.report_path();
        write_error_report(&output.table, &output.results, &path)
            .with_context(|| format!("write {}", path.display()))
    });

    for error in [cleaned.as_ref().err(), report.as_ref().err()]
        .into_iter()
        .flatten()
    {
        tracing::error!(error = %format!("{error:#}"), "output failed");
    }

    WrittenOutputs { cleaned, report }
}

fn prepare_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}
