//! Error types for the composable-propr library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum ProprError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Domain error: negative value {value} at row {row}, column {col}")]
    NegativeValue { value: f64, row: usize, col: usize },

    #[error("Domain error: missing value at row {row}, column {col}")]
    MissingValue { row: usize, col: usize },

    #[error("Invalid value '{value}' at row {row}, column {col}")]
    InvalidValue {
        value: String,
        row: usize,
        col: usize,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProprError {
    /// True for the errors raised by the `check` gate on compositional input.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            ProprError::NegativeValue { .. } | ProprError::MissingValue { .. }
        )
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ProprError>;
