use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get the absolute path to test fixtures
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Helper to create a Command for the avc binary, run inside `dir`
#[allow(deprecated)]
fn avc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("avc").expect("Failed to find avc binary");
    cmd.current_dir(dir.path());
    cmd
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_clean_sheet() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("valid_assets.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"))
        .stdout(predicate::str::contains("Missing mandatory values: 0"))
        .stdout(predicate::str::contains("Dates auto-formatted: 2"));

    assert!(dir.path().join("validated.xlsx").exists());
}

#[test]
fn test_validate_reports_issues_and_fails() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("broken_assets.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Missing mandatory values: 2"))
        .stdout(predicate::str::contains("Final Value issues: 1"))
        .stdout(predicate::str::contains("Invalid dates: 1"))
        .stdout(predicate::str::contains("Additional rule violations: 1"))
        .stdout(predicate::str::contains("row 1, owner_name"));

    assert!(dir.path().join("validated.xlsx").exists());
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let output = avc(&dir)
        .arg("validate")
        .arg(fixture_path("broken_assets.csv"))
        .arg("--profile")
        .arg("dates_only")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["profile"], "dates_only");
    assert_eq!(report["passed"], false);
    assert_eq!(report["total_issues"], 1);
    assert_eq!(
        report["summary"],
        serde_json::json!(["Invalid dates: 1", "Dates auto-formatted: 2"])
    );
    assert_eq!(report["flagged_cells"][0]["row"], 2);
    assert_eq!(report["flagged_cells"][0]["column"], "inspection_date");
}

#[test]
fn test_validate_csv_output() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("broken_assets.csv"))
        .arg("--profile")
        .arg("final_value_only")
        .arg("--output")
        .arg("checked.csv")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Final Value issues: 1"));

    let written = fs::read_to_string(dir.path().join("checked.csv")).unwrap();
    assert!(written.contains("8000.5 | Final value must be a non-decimal integer"));
    assert!(!dir.path().join("validated.xlsx").exists());
}

#[test]
fn test_validate_with_config() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("valid_assets.csv"))
        .arg("--config")
        .arg(fixture_path("export.toml"))
        .arg("--output")
        .arg("review.xlsx")
        .assert()
        .success();

    assert!(dir.path().join("review.xlsx").exists());
}

#[test]
fn test_validate_invalid_config() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("valid_assets.csv"))
        .arg("--config")
        .arg(fixture_path("invalid_export.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load export configuration"));
}

#[test]
fn test_validate_refuses_missing_columns() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("missing_columns.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The uploaded file is missing required columns: macroid, asset_type",
        ));

    assert!(!dir.path().join("validated.xlsx").exists());
}

#[test]
fn test_validate_unknown_profile() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg(fixture_path("valid_assets.csv"))
        .arg("--profile")
        .arg("everything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid profile"));
}

#[test]
fn test_validate_missing_file() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("validate")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read sheet"));
}

#[test]
fn test_validate_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("assets.json");
    fs::write(&path, "{}").unwrap();

    avc(&dir)
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_complete_sheet() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("check")
        .arg(fixture_path("valid_assets.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All 18 expected columns are present"))
        .stdout(predicate::str::contains("Rows:     2"));
}

#[test]
fn test_check_missing_columns() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("check")
        .arg(fixture_path("missing_columns.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing 15 of 18 expected columns"))
        .stderr(predicate::str::contains("- owner_name"));
}

#[test]
fn test_check_json_output() {
    let dir = TempDir::new().unwrap();
    let output = avc(&dir)
        .arg("check")
        .arg(fixture_path("missing_columns.csv"))
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["missing_columns"][0], "macroid");
    assert_eq!(report["missing_columns"].as_array().unwrap().len(), 15);
}

// ============================================================================
// sum command tests
// ============================================================================

#[test]
fn test_sum_final_values() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("sum")
        .arg(fixture_path("broken_assets.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total final_value: 117000.5"));
}

#[test]
fn test_sum_json_output() {
    let dir = TempDir::new().unwrap();
    let output = avc(&dir)
        .arg("sum")
        .arg(fixture_path("valid_assets.csv"))
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["final_value_total"], 122000.0);
}

#[test]
fn test_sum_without_final_value_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "asset_name\nPress\n").unwrap();

    avc(&dir)
        .arg("sum")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column 'final_value' is missing"));
}

// ============================================================================
// general
// ============================================================================

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    avc(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Asset Valuation Checker"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("sum"));
}
