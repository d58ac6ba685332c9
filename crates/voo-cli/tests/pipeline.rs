//! Integration tests for the pipeline module.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tempfile::TempDir;

use voo_cli::pipeline::{
    OutputConfig, PipelineOptions, clean_and_validate, process_tables, write_outputs,
};
use voo_model::{CountryList, Schema};
use voo_validate::Category;

fn options() -> PipelineOptions {
    PipelineOptions::default().with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

/// Encodes text as latin-1, the encoding of the exports.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap())
        .collect()
}

fn write_export(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, latin1(content)).unwrap();
    path
}

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn float(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

#[test]
fn test_two_exports_sharing_an_identifier() {
    let dir = TempDir::new().unwrap();
    let file_a = write_export(dir.path(), "a.csv", "Identifiant CNR;Température\nX1;37\n");
    let file_b = write_export(
        dir.path(),
        "b.csv",
        "Identifiant CNR;Température;Score de galsgow\nX1;;10\n",
    );

    let output = clean_and_validate(
        &[file_a, file_b],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();

    assert_eq!(output.table.height(), 1);
    assert_eq!(float(&output.table, "Température"), vec![Some(37.0)]);
    assert_eq!(float(&output.table, "Score de galsgow"), vec![Some(10.0)]);
    assert!(output.source_columns.contains("F1__Température"));
    assert!(output.source_columns.contains("F2__Score de galsgow"));

    let contradictions: Vec<&str> = output
        .results
        .flagged()
        .filter(|set| matches!(set.category, Category::Range | Category::Logical))
        .map(|set| set.name.as_str())
        .collect();
    assert!(contradictions.is_empty(), "unexpected: {contradictions:?}");

    let stats = &output.stats;
    assert_eq!(stats.files[0].source, "a.csv");
    assert_eq!(stats.files[1].source, "b.csv");
    assert_eq!(stats.stacked_rows, 2);
    assert_eq!(stats.cross_file_duplicates, 1);
    assert_eq!(stats.final_rows, 1);
}

#[test]
fn test_intra_file_duplicates_are_counted() {
    let dir = TempDir::new().unwrap();
    let file = write_export(
        dir.path(),
        "export.csv",
        "Identifiant CNR;Hb;Plaquettes\nX1;;200\nX1;120;210\nX2;130;\n",
    );

    let output = clean_and_validate(
        &[file],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();

    assert_eq!(output.stats.files[0].rows, 3);
    assert_eq!(output.stats.files[0].duplicates_dropped, 1);
    assert_eq!(float(&output.table, "Hb"), vec![Some(120.0), Some(130.0)]);
}

#[test]
fn test_file_count_is_bounded() {
    let schema = Schema::default();
    let countries = CountryList::iso3166();

    let none: [PathBuf; 0] = [];
    let err = clean_and_validate(&none, &schema, &countries, &options()).unwrap_err();
    assert_eq!(err.to_string(), "no input file given");

    let five: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("{i}.csv"))).collect();
    let err = clean_and_validate(&five, &schema, &countries, &options()).unwrap_err();
    assert!(err.to_string().contains("at most 4"));
}

#[test]
fn test_unreadable_export_aborts() {
    let err = clean_and_validate(
        &[PathBuf::from("/nonexistent/export.csv")],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("read exports"));
}

#[test]
fn test_low_glasgow_without_consciousness_disorder() {
    let table = test_df(vec![
        ("Identifiant CNR", vec![Some("X1"), Some("X2")]),
        ("Score de galsgow", vec![Some("5"), Some("5")]),
        ("Troubles de la conscience", vec![Some("Non"), Some("Oui")]),
    ]);

    let output = process_tables(
        &[table],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();

    assert_eq!(
        output.results.get("glasgow_et_conscience").unwrap().rows,
        vec![0]
    );
}

#[test]
fn test_rapid_test_without_antigen_result() {
    let table = test_df(vec![
        ("Identifiant CNR", vec![Some("X1"), Some("X2")]),
        ("Test de diagnostic rapide (TDR)", vec![Some("Oui"), Some("Oui")]),
        ("Ag HRP-2", vec![None, Some("1")]),
        ("Ag Pf pLDH", vec![Some("0"), None]),
    ]);

    let output = process_tables(
        &[table],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();

    assert_eq!(output.results.get("tdr_sans_resultat").unwrap().rows, vec![0]);
}

#[test]
fn test_rapid_test_without_antigen_columns() {
    let table = test_df(vec![
        ("Identifiant CNR", vec![Some("X1")]),
        ("Test de diagnostic rapide (TDR)", vec![Some("Oui")]),
    ]);

    let output = process_tables(
        &[table],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();

    assert!(output.results.get("tdr_sans_resultat").is_none());
}

#[test]
fn test_identifier_override() {
    let table = test_df(vec![
        ("Numero", vec![Some("7"), Some("7")]),
        ("Hb", vec![None, Some("120")]),
    ]);
    let schema = Schema {
        identifier: "Numero".to_string(),
        ..Schema::default()
    };

    let output =
        process_tables(&[table], &schema, &CountryList::iso3166(), &options()).unwrap();

    assert_eq!(output.table.height(), 1);
    assert_eq!(float(&output.table, "Hb"), vec![Some(120.0)]);
}

#[test]
fn test_first_export_value_wins_over_more_complete_second_row() {
    let first = test_df(vec![
        ("Identifiant CNR", vec![Some("X1")]),
        ("Hb", vec![Some("120")]),
    ]);
    let second = test_df(vec![
        ("Identifiant CNR", vec![Some("X1")]),
        ("Hb", vec![Some("95")]),
        ("Température", vec![Some("37")]),
    ]);

    let output = process_tables(
        &[first, second],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();

    assert_eq!(output.table.height(), 1);
    assert_eq!(float(&output.table, "Hb"), vec![Some(120.0)]);
    assert_eq!(float(&output.table, "Température"), vec![Some(37.0)]);
    assert_eq!(output.stats.cross_file_duplicates, 1);
}

#[test]
fn test_write_outputs_with_flagged_rows() {
    let table = test_df(vec![
        ("Identifiant CNR", vec![Some("X1")]),
        ("Température", vec![Some("46")]),
    ]);
    let output = process_tables(
        &[table],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let config = OutputConfig {
        output_dir: dir.path().join("out"),
        ..OutputConfig::default()
    };

    let written = write_outputs(&output, &config);

    let cleaned = written.cleaned.unwrap();
    assert!(cleaned.ends_with("donnees_nettoyees.csv"));
    let content = std::fs::read_to_string(&cleaned).unwrap();
    assert!(content.trim_start_matches('\u{feff}').starts_with("Identifiant CNR,"));

    let report = written.report.unwrap().unwrap();
    assert!(report.ends_with("rapport_erreurs_voo.xlsx"));
    assert!(report.exists());
}

#[test]
fn test_write_outputs_without_flagged_rows() {
    let table = test_df(vec![("Identifiant CNR", vec![Some("X1"), Some("X2")])]);
    let output = process_tables(
        &[table],
        &Schema::default(),
        &CountryList::iso3166(),
        &options(),
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let config = OutputConfig {
        output_dir: dir.path().to_path_buf(),
        ..OutputConfig::default()
    };
    std::fs::write(config.report_path(), b"old report").unwrap();

    let written = write_outputs(&output, &config);

    assert!(written.cleaned.unwrap().exists());
    assert!(written.report.unwrap().is_none());
    assert!(!config.report_path().exists());
}
