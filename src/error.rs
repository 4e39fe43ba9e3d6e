use thiserror::Error;

/// Convenience result type for cleaning, analysis, and reader operations.
pub type DataPrepResult<T> = Result<T, DataPrepError>;

/// Error type shared across the crate.
///
/// Structural misuse (a nonexistent column, an unknown method token) is a hard
/// error; data-shape edge cases reachable from valid input (no infinities
/// present, a column with no mode) are no-ops documented on the operations
/// themselves and never surface here.
#[derive(Debug, Error)]
pub enum DataPrepError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse or serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "excel")]
    /// Excel reader error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The input does not conform to the provided schema (missing required
    /// fields/columns, malformed structure, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A raw value could not be parsed into the required
    /// [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A named column does not exist in the dataset.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// An unknown method token was supplied for imputation or testing.
    #[error("unsupported method '{method}'")]
    UnsupportedMethod { method: String },

    /// The file extension does not map to a supported tabular format.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// Too few usable values for the requested computation.
    #[error("insufficient data for column '{column}': need {required}, got {observed}")]
    InsufficientData {
        column: String,
        required: usize,
        observed: usize,
    },
}

impl DataPrepError {
    /// Shorthand for [`DataPrepError::ColumnNotFound`].
    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}
