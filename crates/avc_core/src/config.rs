//! Rule configuration.
//!
//! The rule set is fixed at build time. [`RuleConfig`] gathers the column
//! lists, thresholds and allowed values into one immutable value that is
//! constructed once and handed to the validator explicitly.

use serde::{Deserialize, Serialize};

/// Column names used by the rules.
pub mod columns {
    pub const MACROID: &str = "macroid";
    pub const ASSET_TYPE: &str = "asset_type";
    pub const ASSET_NAME: &str = "asset_name";
    pub const FINAL_VALUE: &str = "final_value";
    pub const ASSET_USAGE_ID: &str = "asset_usage_id";
    pub const VALUE_BASE: &str = "value_base";
    pub const INSPECTION_DATE: &str = "inspection_date";
    pub const PRODUCTION_CAPACITY: &str = "production_capacity";
    pub const PRODUCTION_CAPACITY_MEASURING_UNIT: &str = "production_capacity_measuring_unit";
    pub const OWNER_NAME: &str = "owner_name";
    pub const PRODUCT_TYPE: &str = "product_type";
    pub const MARKET_APPROACH: &str = "market_approach";
    pub const MARKET_APPROACH_VALUE: &str = "market_approach_value";
    pub const COST_APPROACH: &str = "cost_approach";
    pub const COST_APPROACH_VALUE: &str = "cost_approach_value";
    pub const COUNTRY: &str = "country";
    pub const REGION: &str = "region";
    pub const CITY: &str = "city";
}

/// Fixed messages attached to flagged cells.
pub mod messages {
    pub const MANDATORY_EMPTY: &str = "This mandatory field is empty";
    pub const FINAL_VALUE_EMPTY: &str = "final_value is mandatory and cannot be empty";
    pub const FINAL_VALUE_NOT_INTEGER: &str = "Final value must be a non-decimal integer";
    pub const DATE_FORMAT: &str = "Date must be in dd-mm-YYYY format";
    pub const MARKET_APPROACH: &str = "market_approach must be 0, 1, or 2";
    pub const MARKET_APPROACH_VALUE: &str = "Must be a number when approach is 1 or 2";
    pub const NON_NEGATIVE: &str = "Must be a non-negative number";
}

use columns::*;

/// Every column an uploaded table must contain, in display order.
pub const EXPECTED_COLUMNS: [&str; 18] = [
    MACROID,
    ASSET_TYPE,
    ASSET_NAME,
    FINAL_VALUE,
    ASSET_USAGE_ID,
    VALUE_BASE,
    INSPECTION_DATE,
    PRODUCTION_CAPACITY,
    PRODUCTION_CAPACITY_MEASURING_UNIT,
    OWNER_NAME,
    PRODUCT_TYPE,
    MARKET_APPROACH,
    MARKET_APPROACH_VALUE,
    COST_APPROACH,
    COST_APPROACH_VALUE,
    COUNTRY,
    REGION,
    CITY,
];

/// Columns that must be non-empty unless an exemption applies.
///
/// `macroid`, `cost_approach` and `cost_approach_value` are optional.
pub const MANDATORY_FIELDS: [&str; 15] = [
    ASSET_TYPE,
    ASSET_NAME,
    ASSET_USAGE_ID,
    VALUE_BASE,
    INSPECTION_DATE,
    FINAL_VALUE,
    PRODUCTION_CAPACITY,
    PRODUCTION_CAPACITY_MEASURING_UNIT,
    OWNER_NAME,
    PRODUCT_TYPE,
    MARKET_APPROACH,
    MARKET_APPROACH_VALUE,
    COUNTRY,
    REGION,
    CITY,
];

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Minimum value (inclusive)
    pub min: i64,
    /// Maximum value (inclusive)
    pub max: i64,
}

impl IntRange {
    /// Creates a new inclusive range.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within the range.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Immutable rule configuration.
///
/// # Example
///
/// ```rust
/// use avc_core::RuleConfig;
///
/// let config = RuleConfig::default();
/// assert_eq!(config.expected_columns.len(), 18);
/// assert!(config.asset_usage_range.contains(38));
/// assert_eq!(config.asset_usage_message(), "asset_usage_id must be in [38-56]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Columns the table must contain
    pub expected_columns: Vec<String>,

    /// Columns checked by the mandatory-presence rule, in check order
    pub mandatory_fields: Vec<String>,

    /// Valid `asset_usage_id` codes
    pub asset_usage_range: IntRange,

    /// Valid `value_base` codes
    pub value_base_range: IntRange,

    /// Valid `market_approach` codes
    pub market_approach_allowed: Vec<i64>,

    /// Approach codes that require a numeric `market_approach_value`
    pub approach_codes_requiring_value: Vec<i64>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            expected_columns: EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            mandatory_fields: MANDATORY_FIELDS.iter().map(|c| c.to_string()).collect(),
            asset_usage_range: IntRange::new(38, 56),
            value_base_range: IntRange::new(1, 9),
            market_approach_allowed: vec![0, 1, 2],
            approach_codes_requiring_value: vec![1, 2],
        }
    }
}

impl RuleConfig {
    /// Message for an out-of-range `asset_usage_id`.
    pub fn asset_usage_message(&self) -> String {
        range_message(ASSET_USAGE_ID, self.asset_usage_range)
    }

    /// Message for an out-of-range `value_base`.
    pub fn value_base_message(&self) -> String {
        range_message(VALUE_BASE, self.value_base_range)
    }

    /// Returns true if `code` is an allowed market approach.
    pub fn is_allowed_approach(&self, code: i64) -> bool {
        self.market_approach_allowed.contains(&code)
    }

    /// Returns true if `code` makes `market_approach_value` required.
    pub fn approach_requires_value(&self, code: i64) -> bool {
        self.approach_codes_requiring_value.contains(&code)
    }
}

fn range_message(column: &str, range: IntRange) -> String {
    format!("{} must be in [{}-{}]", column, range.min, range.max)
}
