//! Error types for schema and reference data loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or checking model configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read a configuration or reference file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema override is not valid TOML or does not match the schema layout.
    #[error("invalid schema file: {0}")]
    SchemaParse(#[from] toml::de::Error),

    /// Schema content is inconsistent.
    #[error("invalid schema: {reason}")]
    InvalidSchema { reason: String },

    /// Reference list has no entries.
    #[error("country list {path} has no entries")]
    EmptyCountryList { path: PathBuf },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
