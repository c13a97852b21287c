//! Cross-field rules.
//!
//! Whether `market_approach_value` is required depends on the same row's
//! `market_approach`. The approach code is derived in exactly one place,
//! [`ApproachCode::for_row`], and both the mandatory-presence rule and the
//! numeric requirement below read it from there.

use crate::coercion::{is_empty, to_float, to_truncated_integer};
use crate::fields::RuleOutcome;
use avc_core::columns::{MARKET_APPROACH, MARKET_APPROACH_VALUE};
use avc_core::{messages, Issue, RecordTable, RuleConfig};

/// Approach code derived from a row's `market_approach` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproachCode(Option<i64>);

impl ApproachCode {
    /// Derives the code for `row`.
    ///
    /// An empty (or absent) `market_approach` counts as code 0. Otherwise the
    /// value is parsed as a float and truncated; a value that does not parse
    /// has no code.
    pub fn for_row(table: &RecordTable, row: usize) -> Self {
        let raw = table.cell(row, MARKET_APPROACH);
        if is_empty(raw) {
            ApproachCode(Some(0))
        } else {
            ApproachCode(to_truncated_integer(raw))
        }
    }

    /// The numeric code, `None` when the approach could not be parsed.
    pub fn code(&self) -> Option<i64> {
        self.0
    }

    /// Returns true if an empty `market_approach_value` is acceptable.
    pub fn exempts_empty_value(&self) -> bool {
        matches!(self.0, None | Some(0))
    }

    /// Returns true if `market_approach_value` must hold a number.
    pub fn requires_value(&self, config: &RuleConfig) -> bool {
        self.0.is_some_and(|code| config.approach_requires_value(code))
    }
}

/// `market_approach_value` must be numeric when the approach code requires it.
pub fn market_approach_value_requirement(table: &RecordTable, config: &RuleConfig) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for (row, value) in table.column_values(MARKET_APPROACH_VALUE) {
        if !ApproachCode::for_row(table, row).requires_value(config) {
            continue;
        }
        if to_float(value).is_none() {
            outcome.issues.push(Issue::new(
                row,
                MARKET_APPROACH_VALUE,
                messages::MARKET_APPROACH_VALUE,
            ));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use avc_core::{RecordBuilder, TableBuilder};
    use pretty_assertions::assert_eq;

    fn pairs(rows: &[(&str, &str)]) -> RecordTable {
        rows.iter()
            .fold(
                TableBuilder::new().columns([MARKET_APPROACH, MARKET_APPROACH_VALUE]),
                |builder, (approach, value)| {
                    builder.row(
                        RecordBuilder::new()
                            .cell(MARKET_APPROACH, *approach)
                            .cell(MARKET_APPROACH_VALUE, *value)
                            .build(),
                    )
                },
            )
            .build()
    }

    #[test]
    fn test_approach_code_derivation() {
        let table = pairs(&[("", ""), ("1", ""), ("2.9", ""), ("abc", ""), ("0", "")]);
        let codes: Vec<_> = (0..table.len())
            .map(|row| ApproachCode::for_row(&table, row).code())
            .collect();
        assert_eq!(codes, vec![Some(0), Some(1), Some(2), None, Some(0)]);
    }

    #[test]
    fn test_absent_approach_column_counts_as_zero() {
        let table = TableBuilder::new()
            .column(MARKET_APPROACH_VALUE)
            .row(RecordBuilder::new().empty(MARKET_APPROACH_VALUE).build())
            .build();
        assert_eq!(ApproachCode::for_row(&table, 0).code(), Some(0));
    }

    #[test]
    fn test_exemption_and_requirement_agree() {
        let config = RuleConfig::default();
        for raw in ["", "0", "1", "2", "3", "x"] {
            let table = pairs(&[(raw, "")]);
            let code = ApproachCode::for_row(&table, 0);
            if code.requires_value(&config) {
                assert!(!code.exempts_empty_value(), "approach {raw:?}");
            }
        }
    }

    #[test]
    fn test_value_required_for_approach_one_or_two() {
        let config = RuleConfig::default();
        let table = pairs(&[
            ("", ""),
            ("0", ""),
            ("1", ""),
            ("2", "abc"),
            ("2", "1500.75"),
            ("x", ""),
            ("5", ""),
        ]);

        let outcome = market_approach_value_requirement(&table, &config);
        let rows: Vec<_> = outcome.issues.iter().map(|i| i.cell.row).collect();
        assert_eq!(rows, vec![2, 3]);
        assert!(outcome
            .issues
            .iter()
            .all(|i| i.message == "Must be a number when approach is 1 or 2"));
    }
}
