//! Country reference data.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{ModelError, Result};

const ISO3166_NAMES: &str = include_str!("../data/iso3166_names.txt");

/// Source of valid country names.
pub trait CountryLookup {
    /// Returns true when `name` is a valid country name (exact, case-sensitive).
    fn is_valid(&self, name: &str) -> bool;

    /// Number of known names.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory set of country names.
#[derive(Debug, Clone, Default)]
pub struct CountryList {
    names: BTreeSet<String>,
}

impl CountryList {
    /// The bundled ISO 3166-1 English short names.
    pub fn iso3166() -> Self {
        Self::from_text(ISO3166_NAMES)
    }

    /// Parses one name per line; blank lines and `#` comments are skipped.
    pub fn from_text(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Loads a newline-separated list from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_text(&content);
        if list.names.is_empty() {
            return Err(ModelError::EmptyCountryList {
                path: path.to_path_buf(),
            });
        }
        Ok(list)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl CountryLookup for CountryList {
    fn is_valid(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

impl<T: AsRef<str>> FromIterator<T> for CountryList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }
}
