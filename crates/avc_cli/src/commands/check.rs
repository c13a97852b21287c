use anyhow::{Context, Result};
use avc_core::RuleConfig;
use avc_io::read_table;
use avc_validator::SheetValidator;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(file: &str, format: &str) -> Result<()> {
    info!("Checking sheet columns: {}", file);

    let table =
        read_table(Path::new(file)).with_context(|| format!("Failed to read sheet: {}", file))?;
    let validator = SheetValidator::new(RuleConfig::default());
    let missing = validator.missing_columns(&table);
    let expected = validator.config().expected_columns.len();

    if format == "json" {
        let report = json!({
            "file": file,
            "rows": table.len(),
            "expected_columns": expected,
            "missing_columns": missing,
            "passed": missing.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if missing.is_empty() {
        output::print_success(&format!("All {} expected columns are present", expected));
        println!("\nSheet Summary:");
        println!("  Rows:     {}", table.len());
        println!("  Columns:  {}", table.columns().len());
    } else {
        output::print_error(&format!(
            "Missing {} of {} expected columns:",
            missing.len(),
            expected
        ));
        for column in &missing {
            eprintln!("  - {}", column);
        }
    }

    if !missing.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
