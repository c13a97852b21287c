//! # Asset Valuation Checker Core
//!
//! Core data structures and types for the Asset Valuation Checker.
//!
//! This crate provides the building blocks shared by the rule engine, the
//! spreadsheet adapters and the CLI:
//!
//! - **Record Table**: ordered rows of untyped cell values keyed by column name
//! - **Rule Configuration**: the fixed, immutable set of columns, thresholds and
//!   allowed values the engine checks against
//! - **Annotations**: per-cell accumulated messages produced by a validation run
//! - **Summary**: ordered `"<Label>: <count>"` lines describing a run
//!
//! ## Example
//!
//! ```rust
//! use avc_core::{CellValue, RecordBuilder, RuleConfig, TableBuilder};
//!
//! let config = RuleConfig::default();
//! let table = TableBuilder::new()
//!     .columns(config.expected_columns.iter().cloned())
//!     .row(
//!         RecordBuilder::new()
//!             .cell("asset_name", "Warehouse 7")
//!             .cell("final_value", "97000")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.cell(0, "final_value"), &CellValue::from("97000"));
//! assert_eq!(table.cell(0, "city"), &CellValue::Empty);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod report;
pub mod table;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use report::*;
pub use table::*;
