use anyhow::{Context, Result};
use avc_core::{Profile, RuleConfig};
use avc_io::{load_config, read_table, write_table, ExportConfig};
use avc_validator::{project_with_layout, SheetValidator};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output;

pub fn execute(
    file: &str,
    profile: &str,
    output_path: Option<&str>,
    config_path: Option<&str>,
    format: &str,
) -> Result<()> {
    info!("Validating sheet: {}", file);

    let profile: Profile = profile
        .parse()
        .with_context(|| format!("Invalid profile: {}", profile))?;

    let export_config = match config_path {
        Some(path) => load_config(Path::new(path))
            .with_context(|| format!("Failed to load export configuration: {}", path))?,
        None => ExportConfig::default(),
    };

    let table =
        read_table(Path::new(file)).with_context(|| format!("Failed to read sheet: {}", file))?;

    if format != "json" {
        output::print_info(&format!(
            "Sheet loaded: {} rows, {} columns",
            table.len(),
            table.columns().len()
        ));
    }

    // A sheet with missing columns is never validated
    let validator = SheetValidator::new(RuleConfig::default());
    let outcome = validator.run_checked(profile, &table)?;

    let projected = project_with_layout(&outcome, export_config.layout());
    let destination = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&export_config.default_output));
    write_table(&projected, &export_config, &destination)
        .with_context(|| format!("Failed to write output: {}", destination.display()))?;

    output::print_validation_report(&outcome, &destination, format)?;

    if !outcome.passed() {
        std::process::exit(1);
    }

    Ok(())
}
