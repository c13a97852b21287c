//! Error types for the core data model.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for core operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Profile name not recognised
    #[error("Unknown validation profile '{0}' (expected one of: final_value_only, mandatory_only, dates_only, all)")]
    UnknownProfile(String),

    /// Column not part of the table
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Row index past the end of the table
    #[error("Row {row} out of bounds for table with {len} rows")]
    RowOutOfBounds {
        /// Requested row position
        row: usize,
        /// Number of rows in the table
        len: usize,
    },
}

impl CoreError {
    /// Creates a new unknown profile error.
    pub fn unknown_profile(name: impl Into<String>) -> Self {
        Self::UnknownProfile(name.into())
    }

    /// Creates a new unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn(column.into())
    }
}
