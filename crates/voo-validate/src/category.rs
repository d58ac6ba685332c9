//! Rule categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Family a validation rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Completeness,
    Temporal,
    Logical,
    Range,
    Format,
    Dependency,
    Outlier,
    MedicalIntegrity,
}

impl Category {
    /// All categories, in evaluation order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Completeness,
            Self::Temporal,
            Self::Logical,
            Self::Range,
            Self::Format,
            Self::Dependency,
            Self::Outlier,
            Self::MedicalIntegrity,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completeness => "Completeness",
            Self::Temporal => "Temporal",
            Self::Logical => "Logical",
            Self::Range => "Range",
            Self::Format => "Format",
            Self::Dependency => "Dependency",
            Self::Outlier => "Outlier",
            Self::MedicalIntegrity => "Medical integrity",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Completeness => "Mandatory fields and critical dates are filled",
            Self::Temporal => "Dates are ordered and not in the future",
            Self::Logical => "Flags agree with the measured values",
            Self::Range => "Values are physiologically possible",
            Self::Format => "Country names and yes/no answers are well formed",
            Self::Dependency => "Positive findings have a supporting test result",
            Self::Outlier => "Values lie inside the clinical reference interval",
            Self::MedicalIntegrity => "Severity markers do not contradict each other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
