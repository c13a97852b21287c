//! Spreadsheet adapters for the Asset Valuation Checker.
//!
//! This crate moves tables in and out of the rule engine:
//!
//! - [`read_table`] loads the first worksheet of a workbook (or a CSV file)
//!   into a [`RecordTable`](avc_core::RecordTable)
//! - [`write_table`] exports a [`ProjectedTable`](avc_validator::ProjectedTable)
//!   as a highlighted workbook or plain CSV
//! - [`load_config`] reads the export settings from YAML or TOML
//!
//! # Example
//!
//! ```no_run
//! use avc_core::{Profile, RuleConfig};
//! use avc_io::{read_table, write_table, ExportConfig};
//! use avc_validator::{project_with_layout, SheetValidator};
//! use std::path::Path;
//!
//! let table = read_table(Path::new("assets.xlsx")).unwrap();
//! let outcome = SheetValidator::new(RuleConfig::default())
//!     .run_checked(Profile::All, &table)
//!     .unwrap();
//!
//! let config = ExportConfig::default();
//! let projected = project_with_layout(&outcome, config.layout());
//! write_table(&projected, &config, Path::new(&config.default_output)).unwrap();
//! ```

mod config;
mod error;
mod format;
mod reader;
mod writer;

pub use config::*;
pub use error::*;
pub use format::*;
pub use reader::*;
pub use writer::*;
