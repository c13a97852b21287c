//! Annotation projection.
//!
//! Turns a [`ValidationOutcome`] into a [`ProjectedTable`]: display text with
//! every message appended to its cell, a highlight marker on flagged cells,
//! and the layout metadata the export surfaces apply to every cell.

use crate::ValidationOutcome;
use avc_core::{Severity, MESSAGE_SEPARATOR};

/// Appends `message` to a cell's display text.
///
/// Text that is blank or the literal `nan` counts as no value and is replaced
/// outright; anything else keeps its content and gains ` | message`.
pub fn append_message(existing: &str, message: &str) -> String {
    let current = existing.trim();
    if current.is_empty() || current.eq_ignore_ascii_case("nan") {
        message.to_string()
    } else {
        format!("{}{}{}", current, MESSAGE_SEPARATOR, message)
    }
}

/// Reading direction of the rendered sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    LeftToRight,
    #[default]
    RightToLeft,
}

/// Horizontal alignment applied to every header and data cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    Center,
    #[default]
    Right,
}

/// Presentation settings shared by all cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub direction: TextDirection,
    pub align: HorizontalAlign,
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedCell {
    /// Display text, including any appended messages
    pub text: String,
    /// Highlight category, `None` for cells without messages
    pub highlight: Option<Severity>,
}

impl ProjectedCell {
    /// Returns true if the cell carries a highlight.
    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }
}

/// A table ready to be rendered or exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTable {
    /// Header row
    pub columns: Vec<String>,
    /// Data rows, one cell per column, in input order
    pub rows: Vec<Vec<ProjectedCell>>,
    /// Layout applied uniformly to headers and cells
    pub layout: Layout,
}

impl ProjectedTable {
    /// Returns the cell at (`row`, `column`).
    pub fn cell(&self, row: usize, column: &str) -> Option<&ProjectedCell> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }

    /// Number of highlighted cells.
    pub fn highlighted_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| c.is_highlighted())
            .count()
    }
}

/// Projects a validation outcome onto display cells.
pub fn project(outcome: &ValidationOutcome) -> ProjectedTable {
    project_with_layout(outcome, Layout::default())
}

/// Projects a validation outcome using an explicit layout.
pub fn project_with_layout(outcome: &ValidationOutcome, layout: Layout) -> ProjectedTable {
    let table = &outcome.table;
    let columns = table.columns().to_vec();

    let rows: Vec<Vec<ProjectedCell>> = (0..table.len())
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let original = table.cell(row, column).display();
                    match outcome.annotations.get(row, column) {
                        Some(annotation) => ProjectedCell {
                            text: annotation
                                .messages
                                .iter()
                                .fold(original.to_string(), |text, msg| append_message(&text, msg)),
                            highlight: Some(annotation.severity),
                        },
                        None => ProjectedCell {
                            text: original.to_string(),
                            highlight: None,
                        },
                    }
                })
                .collect()
        })
        .collect();

    ProjectedTable {
        columns,
        rows,
        layout,
    }
}
