//! Builder pattern for creating record tables.
//!
//! This module provides ergonomic builders for assembling tables in code,
//! mostly useful in tests and in adapters that read tabular files.

use crate::{CellValue, Record, RecordTable};

/// Builder for creating a [`RecordTable`].
///
/// # Example
///
/// ```rust
/// use avc_core::{RecordBuilder, TableBuilder};
///
/// let table = TableBuilder::new()
///     .column("asset_name")
///     .column("city")
///     .row(RecordBuilder::new().cell("asset_name", "Pump").cell("city", "Riyadh").build())
///     .build();
///
/// assert_eq!(table.columns().len(), 2);
/// assert_eq!(table.cell(0, "city").display(), "Riyadh");
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl TableBuilder {
    /// Creates a new table builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column; duplicates are ignored.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.columns.contains(&name) {
            self.columns.push(name);
        }
        self
    }

    /// Adds several columns in order.
    pub fn columns<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |builder, name| builder.column(name))
    }

    /// Removes a column declared earlier.
    pub fn without_column(mut self, name: &str) -> Self {
        self.columns.retain(|c| c != name);
        for row in &mut self.rows {
            row.remove(name);
        }
        self
    }

    /// Appends a row.
    pub fn row(mut self, row: Record) -> Self {
        self.rows.push(row);
        self
    }

    /// Builds the table.
    pub fn build(self) -> RecordTable {
        RecordTable::from_rows(self.columns, self.rows)
    }
}

/// Builder for a single [`Record`].
#[derive(Debug, Default, Clone)]
pub struct RecordBuilder {
    cells: Record,
}

impl RecordBuilder {
    /// Creates a new record builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell value.
    pub fn cell(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Sets a cell to [`CellValue::Empty`].
    pub fn empty(mut self, column: impl Into<String>) -> Self {
        self.cells.insert(column.into(), CellValue::Empty);
        self
    }

    /// Builds the record.
    pub fn build(self) -> Record {
        self.cells
    }
}
