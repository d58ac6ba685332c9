//! Integration tests for schema overrides and reference data loading.

use std::io::Write;

use tempfile::NamedTempFile;
use voo_model::{
    CountryList, CountryLookup, FieldKind, ModelError, Schema, YesNoVocabulary, fields,
};

#[test]
fn test_toml_override_keeps_defaults() {
    let schema = Schema::from_toml_str(
        r#"
identifier = "Identifiant patient"

[thresholds]
glasgow_coma = 9.0
"#,
    )
    .unwrap();

    assert_eq!(schema.identifier, "Identifiant patient");
    assert_eq!(schema.thresholds.glasgow_coma, 9.0);
    assert_eq!(schema.thresholds.creatinine_umol_l, 265.0);
    assert_eq!(schema.vocabulary, YesNoVocabulary::default());
    assert_eq!(schema.fields, Schema::default().fields);
}

#[test]
fn test_toml_override_replaces_checks() {
    let schema = Schema::from_toml_str(
        r#"
[[range_checks]]
rule = "temperature_invalide"
field = "Température"
bounds = { min = 35.0, max = 42.0 }

[vocabulary]
yes = "Yes"
no = "No"
"#,
    )
    .unwrap();

    assert_eq!(schema.range_checks.len(), 1);
    assert!(!schema.range_checks[0].bounds.contains(43.0));
    assert!(schema.vocabulary.is_yes("Yes"));
    assert_eq!(schema.outlier_checks.len(), 2);
}

#[test]
fn test_toml_rejects_unknown_keys() {
    let result = Schema::from_toml_str("identifer = \"typo\"\n");
    assert!(matches!(result, Err(ModelError::SchemaParse(_))));
}

#[test]
fn test_toml_rejects_empty_identifier() {
    let result = Schema::from_toml_str("identifier = \"  \"\n");
    assert!(matches!(result, Err(ModelError::InvalidSchema { .. })));
}

#[test]
fn test_field_lookup() {
    let schema = Schema::default();
    assert_eq!(
        schema.field(fields::TDR).map(|f| f.kind),
        Some(FieldKind::YesNo)
    );
    assert_eq!(
        schema.fields_of_kind(FieldKind::Country),
        fields::COUNTRIES.to_vec()
    );
    assert!(schema.field("Unknown").is_none());
}

#[test]
fn test_country_list_load() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "# custom\nFrance\nMali\n").unwrap();

    let list = CountryList::load(file.path()).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.is_valid("Mali"));
}

#[test]
fn test_country_list_load_empty() {
    let file = NamedTempFile::new().unwrap();
    let result = CountryList::load(file.path());
    assert!(matches!(result, Err(ModelError::EmptyCountryList { .. })));
}
