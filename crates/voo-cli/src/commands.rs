use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use voo_cli::pipeline::{
    OutputConfig, PipelineOptions, PipelineOutput, clean_and_validate, write_outputs,
};
use voo_ingest::CsvOptions;
use voo_model::{CountryList, CountryLookup, Schema};

use crate::cli::{FieldsArgs, RunArgs, SummaryFormatArg};
use crate::summary::{print_fields, print_preview};
use crate::types::{OutputStatus, RuleSummary, RunResult};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let schema = load_schema(args.schema.as_deref(), None)?;
    print_fields(&schema);
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let _span = info_span!("run", files = args.files.len()).entered();

    let schema = load_schema(args.schema.as_deref(), args.identifier.as_deref())?;
    let countries = match &args.countries {
        Some(path) => CountryList::load(path)
            .with_context(|| format!("load countries from {}", path.display()))?,
        None => CountryList::iso3166(),
    };
    info!(countries = countries.len(), "country list ready");

    let mut options = PipelineOptions::default().with_csv(csv_options(args)?);
    if let Some(date) = args.reference_date {
        options = options.with_reference_date(date);
    }

    let output = clean_and_validate(&args.files, &schema, &countries, &options)?;
    if args.summary_format == SummaryFormatArg::Table {
        print_preview(&output.table, args.preview, &output.source_columns);
    }

    let (cleaned, report) = if args.dry_run {
        info!("dry run, outputs not written");
        (
            OutputStatus::Skipped("dry run"),
            OutputStatus::Skipped("dry run"),
        )
    } else {
        let config = OutputConfig {
            output_dir: args.output_dir.clone(),
            cleaned_name: args.cleaned.clone(),
            report_name: args.report.clone(),
        };
        let written = write_outputs(&output, &config);
        let cleaned = match written.cleaned {
            Ok(path) => OutputStatus::Written(path),
            Err(error) => OutputStatus::Failed(format!("{error:#}")),
        };
        let report = match written.report {
            Ok(Some(path)) => OutputStatus::Written(path),
            Ok(None) => OutputStatus::Skipped("no errors detected"),
            Err(error) => OutputStatus::Failed(format!("{error:#}")),
        };
        (cleaned, report)
    };

    Ok(build_result(args, output, cleaned, report))
}

fn build_result(
    args: &RunArgs,
    output: PipelineOutput,
    cleaned: OutputStatus,
    report: OutputStatus,
) -> RunResult {
    let rules = output
        .results
        .flagged()
        .map(|set| RuleSummary {
            rule: set.name.clone(),
            category: set.category,
            rows: set.len(),
        })
        .collect();
    RunResult {
        inputs: args.files.clone(),
        output_dir: args.output_dir.clone(),
        total_flagged_rows: output.results.total_flagged_rows(),
        stats: output.stats,
        rules,
        cleaned,
        report,
    }
}

fn load_schema(path: Option<&std::path::Path>, identifier: Option<&str>) -> Result<Schema> {
    let mut schema = match path {
        Some(path) => {
            Schema::load(path).with_context(|| format!("load schema {}", path.display()))?
        }
        None => Schema::default(),
    };
    if let Some(identifier) = identifier {
        schema.identifier = identifier.to_string();
    }
    schema.validate().context("invalid schema")?;
    Ok(schema)
}

fn csv_options(args: &RunArgs) -> Result<CsvOptions> {
    let Ok(delimiter) = u8::try_from(args.delimiter) else {
        bail!("delimiter '{}' is not a single-byte character", args.delimiter);
    };
    if !delimiter.is_ascii() {
        bail!("delimiter '{}' is not an ASCII character", args.delimiter);
    }
    let options = CsvOptions::default()
        .with_delimiter(delimiter)
        .with_encoding_label(&args.encoding)
        .with_context(|| format!("encoding '{}'", args.encoding))?;
    Ok(options)
}
