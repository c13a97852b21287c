use anyhow::{bail, Context, Result};
use avc_core::columns::FINAL_VALUE;
use avc_core::CellValue;
use avc_io::read_table;
use avc_validator::final_value_total;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(file: &str, format: &str) -> Result<()> {
    info!("Summing {}: {}", FINAL_VALUE, file);

    let table =
        read_table(Path::new(file)).with_context(|| format!("Failed to read sheet: {}", file))?;
    if !table.has_column(FINAL_VALUE) {
        bail!("Column '{}' is missing", FINAL_VALUE);
    }

    let total = final_value_total(&table);
    let display = CellValue::from(total).display().to_string();

    if format == "json" {
        let report = json!({
            "file": file,
            "rows": table.len(),
            "final_value_total": total,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_success(&format!("Total {}: {}", FINAL_VALUE, display));
    }

    Ok(())
}
