//! Record table representation.
//!
//! A [`RecordTable`] is an ordered sequence of rows, each row a mapping from
//! column name to a raw [`CellValue`]. Row position is the identity used by
//! annotations and highlights, so the table never reorders its rows.

use crate::{CoreError, Result};
use std::collections::HashMap;

/// A raw cell value as read from a spreadsheet.
///
/// Cells arrive at the engine boundary as text. Any interpretation as a
/// number or a date happens later, through the coercion functions of the
/// validator crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    /// Null/missing cell
    #[default]
    Empty,
    /// Text content, untrimmed
    Text(String),
}

static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    /// Creates a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Attempts to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Empty => None,
        }
    }

    /// Returns the cell content as it would be displayed, `""` for an empty cell.
    pub fn display(&self) -> &str {
        self.as_text().unwrap_or("")
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Text)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Text(i.to_string())
    }
}

impl From<f64> for CellValue {
    /// NaN is the spreadsheet readers' marker for a blank cell and maps to
    /// [`CellValue::Empty`]. Whole numbers print without a fractional part.
    fn from(f: f64) -> Self {
        if f.is_nan() {
            CellValue::Empty
        } else if f.fract() == 0.0 && f.abs() < 1e15 {
            CellValue::Text(format!("{}", f as i64))
        } else {
            CellValue::Text(f.to_string())
        }
    }
}

/// A single row of data.
pub type Record = HashMap<String, CellValue>;

/// An ordered table of records with a known column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    /// Column names in display order
    columns: Vec<String>,
    /// The data rows
    rows: Vec<Record>,
}

impl RecordTable {
    /// Creates a new table with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a new empty table with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a new table from columns and rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    /// Returns the column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if the table declares `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Returns the number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter()
    }

    /// Gets a specific row by position.
    pub fn get_row(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    /// Returns the value at (`row`, `column`).
    ///
    /// Missing rows, columns and keys all read as [`CellValue::Empty`].
    pub fn cell(&self, row: usize, column: &str) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// Iterates `(row position, value)` over one column.
    ///
    /// Yields nothing when the table does not declare the column.
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = (usize, &'a CellValue)> + 'a {
        let present = self.has_column(column);
        self.rows
            .iter()
            .enumerate()
            .filter(move |_| present)
            .map(move |(idx, row)| (idx, row.get(column).unwrap_or(&EMPTY)))
    }

    /// Adds a row to the table.
    pub fn add_row(&mut self, row: Record) {
        self.rows.push(row);
    }

    /// Replaces the value at (`row`, `column`).
    pub fn set(&mut self, row: usize, column: &str, value: CellValue) -> Result<()> {
        if !self.has_column(column) {
            return Err(CoreError::unknown_column(column));
        }
        let len = self.rows.len();
        let record = self
            .rows
            .get_mut(row)
            .ok_or(CoreError::RowOutOfBounds { row, len })?;
        record.insert(column.to_string(), value);
        Ok(())
    }
}
