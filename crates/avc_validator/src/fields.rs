//! Field-level rules.
//!
//! Each rule is a pure function over one column (or a list of columns) of a
//! [`RecordTable`]. Rules never touch the table; they return the issues they
//! found and, for the date rule, the corrected values to write back.
//!
//! Columns the table does not declare are skipped silently. Reporting absent
//! columns is the caller's job.

use crate::coercion::{is_empty, parse_date, to_float, to_integer, to_truncated_integer};
use crate::cross_field::ApproachCode;
use avc_core::columns::{
    ASSET_USAGE_ID, FINAL_VALUE, INSPECTION_DATE, MARKET_APPROACH, MARKET_APPROACH_VALUE,
    PRODUCTION_CAPACITY, VALUE_BASE,
};
use avc_core::{messages, CellRef, CellValue, IntRange, Issue, RecordTable, RuleConfig};

/// A value rewritten by a rule instead of being flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Rewritten cell
    pub cell: CellRef,
    /// Replacement value
    pub value: CellValue,
}

/// Result of evaluating one rule group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Violations, in discovery order
    pub issues: Vec<Issue>,
    /// Auto-corrections, in discovery order
    pub corrections: Vec<Correction>,
}

impl RuleOutcome {
    fn flag(&mut self, row: usize, column: &str, message: impl Into<String>) {
        self.issues.push(Issue::new(row, column, message));
    }

    fn correct(&mut self, row: usize, column: &str, value: impl Into<CellValue>) {
        self.corrections.push(Correction {
            cell: CellRef::new(row, column),
            value: value.into(),
        });
    }
}

/// Every mandatory column must be non-empty.
///
/// `market_approach` is never flagged here (empty means approach 0), and
/// `market_approach_value` may stay empty when the row's approach code
/// exempts it.
pub fn mandatory_presence(table: &RecordTable, config: &RuleConfig) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for column in &config.mandatory_fields {
        if column == MARKET_APPROACH {
            continue;
        }
        for (row, value) in table.column_values(column) {
            if !is_empty(value) {
                continue;
            }
            if column == MARKET_APPROACH_VALUE
                && ApproachCode::for_row(table, row).exempts_empty_value()
            {
                continue;
            }
            outcome.flag(row, column, messages::MANDATORY_EMPTY);
        }
    }

    outcome
}

/// `final_value` must be present and a whole number.
pub fn final_value_integer(table: &RecordTable, _config: &RuleConfig) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for (row, value) in table.column_values(FINAL_VALUE) {
        if is_empty(value) {
            outcome.flag(row, FINAL_VALUE, messages::FINAL_VALUE_EMPTY);
        } else if to_integer(value).is_none() {
            outcome.flag(row, FINAL_VALUE, messages::FINAL_VALUE_NOT_INTEGER);
        }
    }

    outcome
}

/// `inspection_date` must be a recognisable date.
///
/// Recognised dates are rewritten to `dd-mm-YYYY` as corrections; blank or
/// unparseable dates are flagged.
pub fn date_format(table: &RecordTable, _config: &RuleConfig) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for (row, value) in table.column_values(INSPECTION_DATE) {
        match parse_date(value) {
            Some(formatted) => outcome.correct(row, INSPECTION_DATE, formatted),
            None => outcome.flag(row, INSPECTION_DATE, messages::DATE_FORMAT),
        }
    }

    outcome
}

/// `asset_usage_id`, when present, must be an integer code within range.
pub fn asset_usage_range(table: &RecordTable, config: &RuleConfig) -> RuleOutcome {
    integer_range(
        table,
        ASSET_USAGE_ID,
        config.asset_usage_range,
        &config.asset_usage_message(),
    )
}

/// `value_base`, when present, must be an integer code within range.
pub fn value_base_range(table: &RecordTable, config: &RuleConfig) -> RuleOutcome {
    integer_range(
        table,
        VALUE_BASE,
        config.value_base_range,
        &config.value_base_message(),
    )
}

fn integer_range(
    table: &RecordTable,
    column: &str,
    range: IntRange,
    message: &str,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for (row, value) in table.column_values(column) {
        // Emptiness belongs to the mandatory rule
        if is_empty(value) {
            continue;
        }
        if !to_integer(value).is_some_and(|v| range.contains(v)) {
            outcome.flag(row, column, message);
        }
    }

    outcome
}

/// `market_approach`, when present, must truncate to an allowed code.
pub fn market_approach_enum(table: &RecordTable, config: &RuleConfig) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for (row, value) in table.column_values(MARKET_APPROACH) {
        if is_empty(value) {
            continue;
        }
        if !to_truncated_integer(value).is_some_and(|code| config.is_allowed_approach(code)) {
            outcome.flag(row, MARKET_APPROACH, messages::MARKET_APPROACH);
        }
    }

    outcome
}

/// `production_capacity`, when present, must be a number no lower than zero.
pub fn production_capacity_non_negative(table: &RecordTable, _config: &RuleConfig) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for (row, value) in table.column_values(PRODUCTION_CAPACITY) {
        if is_empty(value) {
            continue;
        }
        if !to_float(value).is_some_and(|v| v >= 0.0) {
            outcome.flag(row, PRODUCTION_CAPACITY, messages::NON_NEGATIVE);
        }
    }

    outcome
}
