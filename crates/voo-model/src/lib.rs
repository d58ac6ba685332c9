//! VOO record model.
//!
//! The [`Schema`] is the explicit field registry every pipeline stage reads
//! from: the identifier column, the ordered target fields with their semantic
//! kind, the yes/no vocabulary, the numeric bounds of the range and outlier
//! checks, and the clinical thresholds of the coherence rules.
//!
//! Country reference data is an injected capability behind [`CountryLookup`];
//! [`CountryList`] is the bundled ISO 3166-1 implementation.

mod country;
mod error;
pub mod fields;
mod schema;

pub use country::{CountryList, CountryLookup};
pub use error::{ModelError, Result};
pub use schema::{
    BoundCheck, Bounds, ClinicalThresholds, FieldKind, FieldSpec, Schema, YesNoVocabulary,
};
