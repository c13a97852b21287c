//! Export configuration (YAML/TOML).
//!
//! Presentation settings for the highlighted workbook. Every field has a
//! default, so an empty file (or no file at all) gives the standard export.
//!
//! # Example
//!
//! ```rust
//! use avc_io::parse_yaml_config;
//!
//! let yaml = r##"
//! sheet_name: Review
//! highlight_color: "#FF9900"
//! "##;
//!
//! let config = parse_yaml_config(yaml).expect("Failed to parse config");
//! assert_eq!(config.sheet_name, "Review");
//! assert_eq!(config.highlight_rgb().unwrap(), 0xFF9900);
//! assert_eq!(config.default_output, "validated.xlsx");
//! ```

use crate::format::{detect_config_format, ConfigFormat};
use crate::{IoError, Result};
use avc_validator::{HorizontalAlign, Layout, TextDirection};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Horizontal alignment as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    #[default]
    Right,
}

impl From<Alignment> for HorizontalAlign {
    fn from(align: Alignment) -> Self {
        match align {
            Alignment::Left => HorizontalAlign::Left,
            Alignment::Center => HorizontalAlign::Center,
            Alignment::Right => HorizontalAlign::Right,
        }
    }
}

/// Settings for the exported workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the single worksheet
    pub sheet_name: String,
    /// Fill colour of flagged cells, `#RRGGBB`
    pub highlight_color: String,
    /// Alignment of every header and data cell
    pub align: Alignment,
    /// Render the sheet right-to-left
    pub right_to_left: bool,
    /// File written when no output path is given
    pub default_output: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Data".to_string(),
            highlight_color: "#FFDE21".to_string(),
            align: Alignment::Right,
            right_to_left: true,
            default_output: "validated.xlsx".to_string(),
        }
    }
}

impl ExportConfig {
    /// Returns the highlight colour as a packed `0xRRGGBB` value.
    pub fn highlight_rgb(&self) -> Result<u32> {
        let hex = self.highlight_color.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IoError::InvalidColor(self.highlight_color.clone()));
        }
        u32::from_str_radix(digits, 16).map_err(|_| IoError::InvalidColor(self.highlight_color.clone()))
    }

    /// Returns the layout applied to projected tables.
    pub fn layout(&self) -> Layout {
        Layout {
            direction: if self.right_to_left {
                TextDirection::RightToLeft
            } else {
                TextDirection::LeftToRight
            },
            align: self.align.into(),
        }
    }
}

/// Parse an export configuration from a YAML string.
pub fn parse_yaml_config(content: &str) -> Result<ExportConfig> {
    if content.trim().is_empty() {
        return Ok(ExportConfig::default());
    }
    let config: ExportConfig = serde_yaml_ng::from_str(content)?;
    Ok(config)
}

/// Parse an export configuration from a TOML string.
pub fn parse_toml_config(content: &str) -> Result<ExportConfig> {
    let config: ExportConfig =
        toml::from_str(content).map_err(|e| IoError::Toml(e.to_string()))?;
    Ok(config)
}

/// Load an export configuration with automatic format detection.
///
/// ```no_run
/// use avc_io::load_config;
/// use std::path::Path;
///
/// let config = load_config(Path::new("export.toml")).unwrap();
/// println!("Writing sheet: {}", config.sheet_name);
/// ```
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let format = detect_config_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Yaml => parse_yaml_config(&content),
        ConfigFormat::Toml => parse_toml_config(&content),
    }
}
