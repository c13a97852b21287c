//! File format detection from path extensions.

use crate::{IoError, Result};
use std::path::Path;

/// Tabular file formats the adapters can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Any workbook calamine can open (.xlsx, .xlsm, .xlsb, .xls, .ods)
    Workbook,
    /// Comma-separated values (.csv)
    Csv,
}

/// Export configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

fn extension(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or(IoError::InvalidExtension)
}

/// Detects the sheet format of `path`.
///
/// # Errors
///
/// Returns `IoError::InvalidExtension` if the file has no extension.
/// Returns `IoError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_sheet_format(path: &Path) -> Result<SheetFormat> {
    match extension(path)?.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Workbook),
        "csv" => Ok(SheetFormat::Csv),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Detects the configuration format of `path`.
///
/// * `.yaml`, `.yml` → `ConfigFormat::Yaml`
/// * `.toml` → `ConfigFormat::Toml`
pub fn detect_config_format(path: &Path) -> Result<ConfigFormat> {
    match extension(path)?.as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}
