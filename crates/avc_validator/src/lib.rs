//! # Asset Valuation Checker Validator
//!
//! Rule engine for asset valuation sheets. This crate checks a
//! [`RecordTable`](avc_core::RecordTable) against the fixed rule set and
//! produces per-cell annotations, including:
//!
//! - Value coercion (emptiness, integers, floats, day-first dates)
//! - Field rules (mandatory presence, integer ranges, allowed codes, dates)
//! - Cross-field rules (`market_approach_value` depends on `market_approach`)
//! - Profiles that run a fixed, ordered subset of the rule groups
//! - Projection of annotations onto display text and highlights
//!
//! ## Example
//!
//! ```rust
//! use avc_core::{Profile, RecordBuilder, RuleConfig, TableBuilder, EXPECTED_COLUMNS};
//! use avc_validator::{project, SheetValidator};
//!
//! let table = TableBuilder::new()
//!     .columns(EXPECTED_COLUMNS)
//!     .row(RecordBuilder::new().cell("inspection_date", "15/03/2024").build())
//!     .build();
//!
//! let validator = SheetValidator::new(RuleConfig::default());
//! validator.check_columns(&table).expect("all columns present");
//!
//! let outcome = validator.run(Profile::All, &table);
//! if !outcome.passed() {
//!     for line in outcome.summary.lines() {
//!         println!("- {}", line);
//!     }
//! }
//!
//! let projected = project(&outcome);
//! assert_eq!(projected.cell(0, "inspection_date").unwrap().text, "15-03-2024");
//! ```

pub mod coercion;
mod cross_field;
mod engine;
mod error;
mod fields;
mod projector;

pub use cross_field::*;
pub use engine::*;
pub use error::*;
pub use fields::*;
pub use projector::*;
