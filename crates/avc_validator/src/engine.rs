//! Main validation engine.
//!
//! This module provides the [`SheetValidator`] that runs a validation
//! [`Profile`] over a table: it evaluates rule groups in a fixed order,
//! merges their issues into one [`AnnotationSet`], applies date corrections
//! to a private copy of the table and builds the run summary.

use crate::coercion::to_float;
use crate::cross_field::market_approach_value_requirement;
use crate::fields::{
    asset_usage_range, date_format, final_value_integer, mandatory_presence,
    market_approach_enum, production_capacity_non_negative, value_base_range, RuleOutcome,
};
use crate::{Result, ValidationError};
use avc_core::columns::{
    ASSET_USAGE_ID, FINAL_VALUE, INSPECTION_DATE, MARKET_APPROACH, MARKET_APPROACH_VALUE,
    PRODUCTION_CAPACITY, VALUE_BASE,
};
use avc_core::{
    labels, AnnotationSet, CellRef, Profile, RecordTable, RuleConfig, Severity, ValidationSummary,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One independently evaluated group of rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGroup {
    /// Mandatory columns must be non-empty
    MandatoryPresence,
    /// `final_value` must be a whole number
    FinalValueInteger,
    /// `inspection_date` must be a recognisable date
    DateFormat,
    /// `asset_usage_id` range
    AssetUsageRange,
    /// `value_base` range
    ValueBaseRange,
    /// `market_approach` allowed codes
    MarketApproachEnum,
    /// `market_approach_value` numeric when approach requires it
    MarketApproachValue,
    /// `production_capacity` non-negative
    ProductionCapacity,
}

impl RuleGroup {
    /// Returns the group name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RuleGroup::MandatoryPresence => "mandatory_presence",
            RuleGroup::FinalValueInteger => "final_value_integer",
            RuleGroup::DateFormat => "date_format",
            RuleGroup::AssetUsageRange => "asset_usage_range",
            RuleGroup::ValueBaseRange => "value_base_range",
            RuleGroup::MarketApproachEnum => "market_approach_enum",
            RuleGroup::MarketApproachValue => "market_approach_value",
            RuleGroup::ProductionCapacity => "production_capacity",
        }
    }

    /// The single column this group checks, if it checks only one.
    pub fn target_column(&self) -> Option<&'static str> {
        match self {
            RuleGroup::MandatoryPresence => None,
            RuleGroup::FinalValueInteger => Some(FINAL_VALUE),
            RuleGroup::DateFormat => Some(INSPECTION_DATE),
            RuleGroup::AssetUsageRange => Some(ASSET_USAGE_ID),
            RuleGroup::ValueBaseRange => Some(VALUE_BASE),
            RuleGroup::MarketApproachEnum => Some(MARKET_APPROACH),
            RuleGroup::MarketApproachValue => Some(MARKET_APPROACH_VALUE),
            RuleGroup::ProductionCapacity => Some(PRODUCTION_CAPACITY),
        }
    }

    /// Evaluates the group against `table`.
    pub fn evaluate(&self, table: &RecordTable, config: &RuleConfig) -> RuleOutcome {
        match self {
            RuleGroup::MandatoryPresence => mandatory_presence(table, config),
            RuleGroup::FinalValueInteger => final_value_integer(table, config),
            RuleGroup::DateFormat => date_format(table, config),
            RuleGroup::AssetUsageRange => asset_usage_range(table, config),
            RuleGroup::ValueBaseRange => value_base_range(table, config),
            RuleGroup::MarketApproachEnum => market_approach_enum(table, config),
            RuleGroup::MarketApproachValue => market_approach_value_requirement(table, config),
            RuleGroup::ProductionCapacity => production_capacity_non_negative(table, config),
        }
    }
}

/// A summary line and the rule groups that feed it.
struct Section {
    label: &'static str,
    groups: &'static [RuleGroup],
}

const MANDATORY: Section = Section {
    label: labels::MANDATORY,
    groups: &[RuleGroup::MandatoryPresence],
};

const FINAL_VALUE_SECTION: Section = Section {
    label: labels::FINAL_VALUE,
    groups: &[RuleGroup::FinalValueInteger],
};

const DATES: Section = Section {
    label: labels::INVALID_DATES,
    groups: &[RuleGroup::DateFormat],
};

const ADDITIONAL: Section = Section {
    label: labels::ADDITIONAL,
    groups: &[
        RuleGroup::AssetUsageRange,
        RuleGroup::ValueBaseRange,
        RuleGroup::MarketApproachEnum,
        RuleGroup::MarketApproachValue,
        RuleGroup::ProductionCapacity,
    ],
};

fn sections(profile: Profile) -> &'static [Section] {
    match profile {
        Profile::FinalValueOnly => &[FINAL_VALUE_SECTION],
        Profile::MandatoryOnly => &[MANDATORY],
        Profile::DatesOnly => &[DATES],
        Profile::All => &[MANDATORY, FINAL_VALUE_SECTION, DATES, ADDITIONAL],
    }
}

/// Returns the rule groups a profile runs, in execution order.
pub fn profile_groups(profile: Profile) -> Vec<RuleGroup> {
    sections(profile)
        .iter()
        .flat_map(|s| s.groups.iter().copied())
        .collect()
}

/// Result of one validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Profile that produced this outcome
    pub profile: Profile,
    /// Copy of the input with auto-corrections applied
    pub table: RecordTable,
    /// Messages per flagged cell
    pub annotations: AnnotationSet,
    /// Ordered summary lines
    pub summary: ValidationSummary,
}

impl ValidationOutcome {
    /// Returns the highlight set: every flagged cell and its category.
    pub fn highlights(&self) -> BTreeMap<CellRef, Severity> {
        self.annotations.highlights()
    }

    /// Total number of violations reported in the summary.
    pub fn total_issues(&self) -> usize {
        self.summary.total_issues()
    }

    /// Returns true if no violation was found.
    pub fn passed(&self) -> bool {
        self.summary.is_clean()
    }
}

/// Validation engine for asset valuation sheets.
///
/// # Example
///
/// ```rust
/// use avc_core::{Profile, RecordBuilder, RuleConfig, TableBuilder};
/// use avc_validator::SheetValidator;
///
/// let validator = SheetValidator::new(RuleConfig::default());
/// let table = TableBuilder::new()
///     .column("final_value")
///     .row(RecordBuilder::new().cell("final_value", "12.5").build())
///     .build();
///
/// let outcome = validator.run(Profile::FinalValueOnly, &table);
///
/// assert_eq!(outcome.summary.to_strings(), vec!["Final Value issues: 1"]);
/// assert!(outcome.annotations.is_flagged(0, "final_value"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SheetValidator {
    config: RuleConfig,
}

impl SheetValidator {
    /// Creates a new validator with the given rule configuration.
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Returns the rule configuration.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Returns the expected columns the table lacks, in expected order.
    pub fn missing_columns(&self, table: &RecordTable) -> Vec<String> {
        self.config
            .expected_columns
            .iter()
            .filter(|c| !table.has_column(c))
            .cloned()
            .collect()
    }

    /// Fails if the table lacks any expected column.
    pub fn check_columns(&self, table: &RecordTable) -> Result<()> {
        let missing = self.missing_columns(table);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::missing_columns(missing))
        }
    }

    /// Checks the column set, then runs `profile`.
    pub fn run_checked(&self, profile: Profile, table: &RecordTable) -> Result<ValidationOutcome> {
        self.check_columns(table)?;
        Ok(self.run(profile, table))
    }

    /// Runs `profile` over `table`.
    ///
    /// The input is never modified. Rule groups run in the profile's fixed
    /// order and all of them run; later groups add messages to cells flagged
    /// by earlier ones. Columns absent from the table are skipped, and a
    /// single-group profile notes its missing target column in the summary.
    pub fn run(&self, profile: Profile, table: &RecordTable) -> ValidationOutcome {
        info!(profile = %profile, rows = table.len(), "Running validation profile");

        let mut working = table.clone();
        let mut annotations = AnnotationSet::new();
        let mut summary = ValidationSummary::new();

        let sections = sections(profile);
        let single_group = profile_groups(profile).len() == 1;

        for section in sections {
            let mut issues = 0;
            let mut corrections = 0;

            for group in section.groups {
                if single_group {
                    if let Some(column) = group.target_column().filter(|c| !working.has_column(c)) {
                        warn!(column, "Validated column is missing from the table");
                        summary.push_note(format!("Column '{}' is missing", column));
                    }
                }

                let outcome = group.evaluate(&working, &self.config);
                debug!(
                    group = group.name(),
                    issues = outcome.issues.len(),
                    corrections = outcome.corrections.len(),
                    "Rule group evaluated"
                );

                issues += outcome.issues.len();
                corrections += outcome.corrections.len();
                annotations.record_all(outcome.issues);

                for correction in outcome.corrections {
                    let cell = correction.cell;
                    if let Err(err) = working.set(cell.row, &cell.column, correction.value) {
                        warn!(%cell, error = %err, "Could not apply correction");
                    }
                }
            }

            summary.push_count(section.label, issues);
            if corrections > 0 {
                summary.push_count(labels::DATES_AUTO_FORMATTED, corrections);
            }
        }

        info!(
            profile = %profile,
            flagged_cells = annotations.len(),
            issues = summary.total_issues(),
            "Validation finished"
        );

        ValidationOutcome {
            profile,
            table: working,
            annotations,
            summary,
        }
    }
}

/// Sums every `final_value` cell that parses as a number.
///
/// Cells that do not parse are ignored.
pub fn final_value_total(table: &RecordTable) -> f64 {
    table
        .column_values(FINAL_VALUE)
        .filter_map(|(_, value)| to_float(value))
        .filter(|v| !v.is_nan())
        .sum()
}
