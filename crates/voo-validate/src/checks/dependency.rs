//! Findings that require a supporting test result.

use voo_model::YesNoVocabulary;
use voo_model::fields::{ANTIGENS, AG_PV_PLDH, ESP_VIVAX, TDR};

use crate::category::Category;
use crate::result::ErrorSet;
use crate::row_reader::RowReader;

pub fn check(reader: &RowReader<'_>, vocabulary: &YesNoVocabulary) -> Vec<ErrorSet> {
    let mut sets = Vec::new();

    if reader.has_column(ESP_VIVAX) && reader.has_column(AG_PV_PLDH) {
        sets.push(ErrorSet::new(
            "vivax_sans_antigene",
            Category::Dependency,
            reader.rows_where(|row| {
                reader.is_positive(ESP_VIVAX, row) && !reader.is_positive(AG_PV_PLDH, row)
            }),
        ));
    }

    // Without any antigen column there is nothing to compare against.
    let antigens = reader.present(ANTIGENS);
    if reader.has_column(TDR) && !antigens.is_empty() {
        sets.push(ErrorSet::new(
            "tdr_sans_resultat",
            Category::Dependency,
            reader.rows_where(|row| {
                reader.is_yes(TDR, row, vocabulary)
                    && !antigens.iter().any(|column| reader.is_positive(column, row))
            }),
        ));
    }

    sets
}
