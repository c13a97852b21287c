//! Error types for validation operations.
//!
//! Rule violations are not errors; they are recorded as cell annotations. The
//! only blocking condition is a table that lacks required columns.

use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur before a validation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Expected columns are absent from the table
    #[error("The uploaded file is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

impl ValidationError {
    /// Creates a new missing columns error.
    pub fn missing_columns(columns: Vec<String>) -> Self {
        Self::MissingColumns { columns }
    }
}
