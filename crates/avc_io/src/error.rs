//! Errors raised while reading or writing sheets and export configuration.

use thiserror::Error;

/// Errors that can occur during import, export or configuration loading.
#[derive(Debug, Error)]
pub enum IoError {
    /// The workbook could not be opened or a sheet could not be read
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook has no sheets
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// Writing the highlighted workbook failed
    #[error("Failed to write XLSX: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    Toml(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Highlight colour is not a `#RRGGBB` value
    #[error("Invalid highlight colour: {0}")]
    InvalidColor(String),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for import and export operations.
pub type Result<T> = std::result::Result<T, IoError>;
