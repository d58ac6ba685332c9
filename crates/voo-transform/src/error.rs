//! Error types for table transformations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Renaming produced a name that already exists in the frame.
    #[error("column '{column}' already exists in file {file_index}")]
    ColumnCollision { column: String, file_index: usize },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
