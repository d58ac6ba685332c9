//! Field registry for the VOO exports.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::fields;

/// Semantic type of a target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, compared as-is.
    Text,
    /// Calendar date, parsed day-first by the temporal checks.
    Date,
    /// Measurement coerced to `f64` before validation.
    Numeric,
    /// Indicator where `1` means positive.
    Flag,
    /// Answer drawn from the yes/no vocabulary.
    YesNo,
    /// Country name checked against the reference list.
    Country,
}

impl FieldKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Date => "Date",
            Self::Numeric => "Numeric",
            Self::Flag => "Flag",
            Self::YesNo => "Yes/No",
            Self::Country => "Country",
        }
    }
}

/// One canonical column of the merged table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Inclusive validity range. An absent side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    /// Range closed on both sides.
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Range with only a lower bound.
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Returns true if `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// A named numeric check: rows whose `field` falls outside `bounds` are flagged
/// under `rule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundCheck {
    pub rule: String,
    pub field: String,
    pub bounds: Bounds,
}

impl BoundCheck {
    pub fn new(rule: impl Into<String>, field: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            rule: rule.into(),
            field: field.into(),
            bounds,
        }
    }
}

/// Tokens used by yes/no answers in the exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YesNoVocabulary {
    pub yes: String,
    pub no: String,
}

impl Default for YesNoVocabulary {
    fn default() -> Self {
        Self {
            yes: "Oui".to_string(),
            no: "Non".to_string(),
        }
    }
}

impl YesNoVocabulary {
    pub fn is_yes(&self, value: &str) -> bool {
        value == self.yes
    }

    pub fn contains(&self, value: &str) -> bool {
        value == self.yes || value == self.no
    }
}

/// Cutoffs used by the coherence and integrity rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalThresholds {
    /// Parasitemia (%) above which the "> 4%" flag must be set.
    pub parasitemia_percent: f64,
    /// Creatinine (µmol/l) above which the WHO severity flag must be set.
    pub creatinine_umol_l: f64,
    /// Glasgow score at or below which a consciousness disorder is expected,
    /// and above which a confirmed coma is contradictory.
    pub glasgow_coma: f64,
}

impl Default for ClinicalThresholds {
    fn default() -> Self {
        Self {
            parasitemia_percent: 4.0,
            creatinine_umol_l: 265.0,
            glasgow_coma: 8.0,
        }
    }
}

/// Explicit schema passed through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schema {
    /// Column used as the deduplication key.
    pub identifier: String,
    /// Ordered target fields; order decides canonical column placement.
    pub fields: Vec<FieldSpec>,
    pub vocabulary: YesNoVocabulary,
    pub range_checks: Vec<BoundCheck>,
    pub outlier_checks: Vec<BoundCheck>,
    pub thresholds: ClinicalThresholds,
}

impl Default for Schema {
    fn default() -> Self {
        use FieldKind::{Country, Date, Flag, Numeric, Text, YesNo};

        let fields = [
            (fields::IDENTIFIANT, Text),
            (fields::DATE_DIAGNOSTIC, Date),
            (fields::ESP_FALCIPARUM, Flag),
            (fields::DATE_SYMPTOMES, Date),
            (fields::DATE_RETOUR, Date),
            (fields::DATE_PREMIERS_SYMPTOMES_ACCES, Date),
            (fields::PARASITEMIE, Numeric),
            (fields::SCORE_GLASGOW, Numeric),
            (fields::ESP_VIVAX, Flag),
            (fields::ESP_OVALE, Flag),
            (fields::ESP_MALARIAE, Flag),
            (fields::ESP_SPP, Flag),
            (fields::ESP_KNOWLESI, Flag),
            (fields::ESP_NEGATIVE, Flag),
            (fields::TEMPERATURE, Numeric),
            (fields::DENSITE_POURCENT, Numeric),
            (fields::HB, Numeric),
            (fields::PLAQUETTES, Numeric),
            (fields::DUREE_SEJOUR, Numeric),
            (fields::TROUBLES_CONSCIENCE, YesNo),
            (fields::CREATININEMIE, Numeric),
            (fields::CREATININEMIE_SUP_265, Flag),
            (fields::TDR, YesNo),
            (fields::AG_HRP2, Flag),
            (fields::AG_COM_PLDH, Flag),
            (fields::AG_PF_PLDH, Flag),
            (fields::AG_PV_PLDH, Flag),
            (fields::COMA_AVERE, YesNo),
            (fields::PAYS_RESIDENCE, Country),
            (fields::PAYS_VISITE_1, Country),
            (fields::PAYS_VISITE_2, Country),
            (fields::PARASITEMIE_SUP_4, Flag),
        ]
        .into_iter()
        .map(|(name, kind)| FieldSpec::new(name, kind))
        .collect();

        Self {
            identifier: fields::ID_CNR.to_string(),
            fields,
            vocabulary: YesNoVocabulary::default(),
            range_checks: vec![
                BoundCheck::new(
                    "temperature_invalide",
                    fields::TEMPERATURE,
                    Bounds::between(30.0, 45.0),
                ),
                BoundCheck::new(
                    "glasgow_invalide",
                    fields::SCORE_GLASGOW,
                    Bounds::between(3.0, 15.0),
                ),
                BoundCheck::new(
                    "parasitemie_pourcentage",
                    fields::DENSITE_POURCENT,
                    Bounds::between(0.0, 100.0),
                ),
                BoundCheck::new("hb_invalide", fields::HB, Bounds::between(50.0, 200.0)),
                BoundCheck::new(
                    "duree_negative",
                    fields::DUREE_SEJOUR,
                    Bounds::at_least(0.0),
                ),
            ],
            outlier_checks: vec![
                BoundCheck::new(
                    "outliers_plaquettes",
                    fields::PLAQUETTES,
                    Bounds::between(150.0, 450.0),
                ),
                BoundCheck::new(
                    "outliers_hemoglobine",
                    fields::HB,
                    Bounds::between(50.0, 200.0),
                ),
            ],
            thresholds: ClinicalThresholds::default(),
        }
    }
}

impl Schema {
    /// Parses a TOML override. Keys left out keep their default value.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let schema: Self = toml::from_str(content)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Loads a TOML override from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Names of every target field, in schema order.
    pub fn target_columns(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Names of the fields coerced to numbers.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.fields_of_kind(FieldKind::Numeric)
    }

    /// Names of the fields of one kind, in schema order.
    pub fn fields_of_kind(&self, kind: FieldKind) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Looks up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(invalid("identifier column is empty"));
        }
        if self.vocabulary.yes == self.vocabulary.no {
            return Err(invalid("yes and no tokens must differ"));
        }

        let mut names = BTreeSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(invalid("field with an empty name"));
            }
            if !names.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
        }

        let mut rules = BTreeSet::new();
        for check in self.range_checks.iter().chain(&self.outlier_checks) {
            if !rules.insert(check.rule.as_str()) {
                return Err(invalid(format!("duplicate check '{}'", check.rule)));
            }
            if let (Some(min), Some(max)) = (check.bounds.min, check.bounds.max)
                && min > max
            {
                return Err(invalid(format!(
                    "check '{}' has min {} above max {}",
                    check.rule, min, max
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ModelError {
    ModelError::InvalidSchema {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        let schema = Schema::default();
        schema.validate().unwrap();
        assert_eq!(schema.identifier, "Identifiant CNR");
        assert_eq!(schema.fields.len(), 32);
    }

    #[test]
    fn test_numeric_columns() {
        let schema = Schema::default();
        assert_eq!(
            schema.numeric_columns(),
            vec![
                "Parasitémie",
                "Score de galsgow",
                "Température",
                "Densité (%)",
                "Hb",
                "Plaquettes",
                "Durée du séjour",
                "Créatininémie",
            ]
        );
    }

    #[test]
    fn test_bounds_contains() {
        let temperature = Bounds::between(30.0, 45.0);
        assert!(temperature.contains(30.0));
        assert!(temperature.contains(45.0));
        assert!(!temperature.contains(46.0));
        assert!(!temperature.contains(29.9));

        let duration = Bounds::at_least(0.0);
        assert!(duration.contains(0.0));
        assert!(duration.contains(1e9));
        assert!(!duration.contains(-1.0));
    }

    #[test]
    fn test_vocabulary() {
        let vocabulary = YesNoVocabulary::default();
        assert!(vocabulary.is_yes("Oui"));
        assert!(!vocabulary.is_yes("oui"));
        assert!(vocabulary.contains("Non"));
        assert!(!vocabulary.contains("Peut-être"));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut schema = Schema::default();
        schema.range_checks[0].bounds = Bounds::between(45.0, 30.0);
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("temperature_invalide"));
    }

    #[test]
    fn test_validate_rejects_duplicate_fields() {
        let mut schema = Schema::default();
        schema.fields.push(FieldSpec::new("Hb", FieldKind::Numeric));
        assert!(matches!(
            schema.validate(),
            Err(ModelError::InvalidSchema { .. })
        ));
    }
}
