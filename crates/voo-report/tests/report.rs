//! Report and CSV export on disk.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tempfile::TempDir;
use voo_report::{write_cleaned_csv, write_error_report};
use voo_validate::{Category, ErrorSet, RuleResults};

fn table() -> DataFrame {
    let columns: Vec<Column> = vec![
        Series::new("Identifiant CNR".into(), &["X1", "X2", "X3"]).into_column(),
        Series::new("Température".into(), &[Some(46.0), Some(37.0), None]).into_column(),
        Series::new("Pays de résidence".into(), &[Some("France"), None, Some("Atlantis")])
            .into_column(),
    ];
    DataFrame::new(columns).unwrap()
}

fn results() -> RuleResults {
    let mut results = RuleResults::default();
    results.push(ErrorSet::new("temperature_invalide", Category::Range, vec![0]));
    results.push(ErrorSet::new("hb_invalide", Category::Range, vec![]));
    results.push(ErrorSet::new(
        "Pays de résidence_invalide",
        Category::Format,
        vec![1, 2],
    ));
    results
}

#[test]
fn test_report_written_when_rules_flag_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rapport_erreurs_voo.xlsx");

    let written = write_error_report(&table(), &results(), &path).unwrap();

    assert_eq!(written.as_deref(), Some(path.as_path()));
    let bytes = std::fs::read(&path).unwrap();
    // xlsx files are zip archives
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_no_report_without_flagged_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rapport_erreurs_voo.xlsx");
    let mut results = RuleResults::default();
    results.push(ErrorSet::new("hb_invalide", Category::Range, vec![]));

    let written = write_error_report(&table(), &results, &path).unwrap();

    assert_eq!(written, None);
    assert!(!path.exists());
}

#[test]
fn test_clean_run_removes_previous_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rapport_erreurs_voo.xlsx");
    write_error_report(&table(), &results(), &path).unwrap();
    assert!(path.exists());
    let mut clean = RuleResults::default();
    clean.push(ErrorSet::new("temperature_invalide", Category::Range, vec![]));

    let written = write_error_report(&table(), &clean, &path).unwrap();

    assert_eq!(written, None);
    assert!(!path.exists());
}

#[test]
fn test_previous_report_that_cannot_be_removed_is_an_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be removed as a file.
    let path = dir.path().join("rapport_erreurs_voo.xlsx");
    std::fs::create_dir(&path).unwrap();

    let err = write_error_report(&table(), &RuleResults::default(), &path).unwrap_err();

    assert!(err.to_string().contains("XLSX"));
    assert!(path.exists());
}

#[test]
fn test_report_destination_failure_surfaces() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("rapport.xlsx");

    let err = write_error_report(&table(), &results(), &path).unwrap_err();

    assert!(err.to_string().contains("XLSX"));
}

#[test]
fn test_cleaned_csv_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("donnees_nettoyees.csv");

    write_cleaned_csv(&table(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let content = content.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Identifiant CNR,Température,Pays de résidence",
            "X1,46,France",
            "X2,37,",
            "X3,,Atlantis",
        ]
    );
}
