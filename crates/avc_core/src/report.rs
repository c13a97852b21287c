//! Validation output types.
//!
//! A validation run produces three things: per-cell [`Annotation`]s collected
//! in an [`AnnotationSet`], the highlight set derived from it, and an ordered
//! [`ValidationSummary`].

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Separator used when several messages land on the same cell.
pub const MESSAGE_SEPARATOR: &str = " | ";

/// A named, fixed composition of rule groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// `final_value` integer rule alone
    FinalValueOnly,
    /// Mandatory-presence rule alone
    MandatoryOnly,
    /// Date format rule alone
    DatesOnly,
    /// Every rule group, in fixed order
    All,
}

impl Profile {
    /// All profiles, in menu order.
    pub const ALL: [Profile; 4] = [
        Profile::FinalValueOnly,
        Profile::MandatoryOnly,
        Profile::DatesOnly,
        Profile::All,
    ];

    /// Returns the profile name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::FinalValueOnly => "final_value_only",
            Profile::MandatoryOnly => "mandatory_only",
            Profile::DatesOnly => "dates_only",
            Profile::All => "all",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| CoreError::unknown_profile(s))
    }
}

/// Position of a cell: row position plus column name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-based row position in the table
    pub row: usize,
    /// Column name
    pub column: String,
}

impl CellRef {
    /// Creates a new cell reference.
    pub fn new(row: usize, column: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, {}", self.row, self.column)
    }
}

/// Highlight category of a flagged cell.
///
/// Every violation currently maps to the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// At least one rule violation was recorded on the cell
    #[default]
    Flagged,
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Offending cell
    pub cell: CellRef,
    /// Human-readable message
    pub message: String,
}

impl Issue {
    /// Creates a new issue.
    pub fn new(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            cell: CellRef::new(row, column),
            message: message.into(),
        }
    }
}

/// Messages accumulated on one cell, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotation {
    /// Highlight category
    pub severity: Severity,
    /// Messages, oldest first
    pub messages: Vec<String>,
}

impl Annotation {
    /// Returns the messages joined with [`MESSAGE_SEPARATOR`].
    pub fn joined(&self) -> String {
        self.messages.join(MESSAGE_SEPARATOR)
    }
}

/// Append-only map of cell annotations.
///
/// Messages recorded on the same cell are kept in the order they were
/// recorded; nothing is ever replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationSet {
    cells: BTreeMap<CellRef, Annotation>,
}

impl AnnotationSet {
    /// Creates a new empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the annotation of `cell`.
    pub fn record(&mut self, cell: CellRef, message: impl Into<String>) {
        self.cells
            .entry(cell)
            .or_default()
            .messages
            .push(message.into());
    }

    /// Appends every issue, in order.
    pub fn record_all(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.record(issue.cell, issue.message);
        }
    }

    /// Returns the annotation at (`row`, `column`), if any.
    pub fn get(&self, row: usize, column: &str) -> Option<&Annotation> {
        self.cells.get(&CellRef::new(row, column))
    }

    /// Returns the messages recorded at (`row`, `column`).
    pub fn messages(&self, row: usize, column: &str) -> &[String] {
        self.get(row, column)
            .map(|a| a.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if the cell carries at least one message.
    pub fn is_flagged(&self, row: usize, column: &str) -> bool {
        self.get(row, column).is_some()
    }

    /// Number of flagged cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell is flagged.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates annotations in (row, column) order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &Annotation)> {
        self.cells.iter()
    }

    /// Returns the highlight set: every flagged cell mapped to its category.
    pub fn highlights(&self) -> BTreeMap<CellRef, Severity> {
        self.cells
            .iter()
            .map(|(cell, annotation)| (cell.clone(), annotation.severity))
            .collect()
    }
}

/// One line of a run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SummaryLine {
    /// `"<label>: <count>"`
    Count {
        /// Rule group label
        label: String,
        /// Number of issues (or corrections) attributed to the group
        count: usize,
    },
    /// Free-form note, e.g. an absent column
    Note {
        /// Note text
        text: String,
    },
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Count { label, count } => write!(f, "{}: {}", label, count),
            SummaryLine::Note { text } => f.write_str(text),
        }
    }
}

/// Summary labels produced by the rule groups.
pub mod labels {
    pub const FINAL_VALUE: &str = "Final Value issues";
    pub const MANDATORY: &str = "Missing mandatory values";
    pub const INVALID_DATES: &str = "Invalid dates";
    pub const DATES_AUTO_FORMATTED: &str = "Dates auto-formatted";
    pub const ADDITIONAL: &str = "Additional rule violations";

    /// Labels whose counts are rule violations.
    pub const ISSUE_LABELS: [&str; 4] = [FINAL_VALUE, MANDATORY, INVALID_DATES, ADDITIONAL];
}

/// Ordered summary of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    lines: Vec<SummaryLine>,
}

impl ValidationSummary {
    /// Creates a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `"<label>: <count>"` line.
    pub fn push_count(&mut self, label: impl Into<String>, count: usize) {
        self.lines.push(SummaryLine::Count {
            label: label.into(),
            count,
        });
    }

    /// Adds a free-form note line.
    pub fn push_note(&mut self, text: impl Into<String>) {
        self.lines.push(SummaryLine::Note { text: text.into() });
    }

    /// Returns the lines in order.
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// Returns the count reported under `label`, if present.
    pub fn count(&self, label: &str) -> Option<usize> {
        self.lines.iter().find_map(|line| match line {
            SummaryLine::Count { label: l, count } if l == label => Some(*count),
            _ => None,
        })
    }

    /// Sums the counts of the violation labels.
    ///
    /// Auto-formatting counts are corrections, not violations, and are excluded.
    pub fn total_issues(&self) -> usize {
        labels::ISSUE_LABELS
            .iter()
            .filter_map(|label| self.count(label))
            .sum()
    }

    /// Returns true if the run found no violations.
    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }

    /// Renders every line as text.
    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profile_round_trip_names() {
        for profile in Profile::ALL {
            assert_eq!(profile.as_str().parse::<Profile>().unwrap(), profile);
        }
        assert_eq!(
            "everything".parse::<Profile>(),
            Err(CoreError::UnknownProfile("everything".into()))
        );
    }

    #[test]
    fn test_annotations_append_in_order() {
        let mut set = AnnotationSet::new();
        set.record(CellRef::new(0, "final_value"), "first");
        set.record(CellRef::new(0, "final_value"), "second");
        set.record(CellRef::new(1, "city"), "other");

        assert_eq!(set.len(), 2);
        assert_eq!(set.messages(0, "final_value"), ["first", "second"]);
        assert_eq!(
            set.get(0, "final_value").unwrap().joined(),
            "first | second"
        );
        assert!(set.messages(3, "city").is_empty());
    }

    #[test]
    fn test_highlights_cover_every_flagged_cell() {
        let mut set = AnnotationSet::new();
        set.record_all(vec![
            Issue::new(2, "inspection_date", "bad"),
            Issue::new(1, "owner_name", "empty"),
        ]);

        let highlights: Vec<_> = set.highlights().into_iter().collect();
        assert_eq!(
            highlights,
            vec![
                (CellRef::new(1, "owner_name"), Severity::Flagged),
                (CellRef::new(2, "inspection_date"), Severity::Flagged),
            ]
        );
    }

    #[test]
    fn test_report_types_serialize() {
        let mut summary = ValidationSummary::new();
        summary.push_note("Column 'final_value' is missing");
        summary.push_count(labels::FINAL_VALUE, 0);

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({
                "lines": [
                    {"kind": "note", "text": "Column 'final_value' is missing"},
                    {"kind": "count", "label": "Final Value issues", "count": 0},
                ]
            })
        );
        assert_eq!(
            serde_json::to_value(Profile::DatesOnly).unwrap(),
            serde_json::json!("dates_only")
        );
        assert_eq!(
            serde_json::to_value(Severity::Flagged).unwrap(),
            serde_json::json!("flagged")
        );
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = ValidationSummary::new();
        summary.push_count(labels::MANDATORY, 2);
        summary.push_note("Column 'inspection_date' is missing");
        summary.push_count(labels::INVALID_DATES, 1);
        summary.push_count(labels::DATES_AUTO_FORMATTED, 5);

        assert_eq!(summary.total_issues(), 3);
        assert!(!summary.is_clean());
        assert_eq!(
            summary.to_strings(),
            vec![
                "Missing mandatory values: 2",
                "Column 'inspection_date' is missing",
                "Invalid dates: 1",
                "Dates auto-formatted: 5",
            ]
        );
    }
}
