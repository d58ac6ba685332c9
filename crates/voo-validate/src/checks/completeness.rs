//! Missing mandatory values.

use voo_model::fields::{CRITICAL_DATES, MANDATORY, SPECIES_EVIDENCE};

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

pub fn check(reader: &RowReader<'_>) -> Vec<ErrorSet> {
    let mut sets = Vec::new();

    for column in reader.present(MANDATORY) {
        sets.push(ErrorSet::new(
            format!("manquant_{column}"),
            Category::Completeness,
            reader.missing_rows(column),
        ));
    }

    for column in reader.present(CRITICAL_DATES) {
        sets.push(ErrorSet::new(
            format!("date_critique_manquante_{column}"),
            Category::Completeness,
            reader.missing_rows(column),
        ));
    }

    // No species, parasitemia or Glasgow evidence at all.
    let evidence = reader.present(SPECIES_EVIDENCE);
    if !evidence.is_empty() {
        sets.push(ErrorSet::new(
            "especes_toutes_absentes",
            Category::Completeness,
            reader.rows_where(|row| evidence.iter().all(|column| reader.is_missing(column, row))),
        ));
    }

    sets
}
