use anyhow::Result;
use avc_validator::ValidationOutcome;
use colored::*;
use serde_json::json;
use std::path::Path;

pub fn print_validation_report(
    outcome: &ValidationOutcome,
    destination: &Path,
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json_report(outcome, destination),
        _ => {
            print_text_report(outcome, destination);
            Ok(())
        }
    }
}

fn print_text_report(outcome: &ValidationOutcome, destination: &Path) {
    println!("\n{}", "═".repeat(60));
    println!(
        "{}",
        format!("  VALIDATION REPORT ({})", outcome.profile).bold()
    );
    println!("{}", "═".repeat(60));

    if outcome.passed() {
        println!("\n{} {}", "✓".green().bold(), "No issues found".green().bold());
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            format!("{} issues found", outcome.total_issues()).red().bold()
        );
    }

    println!("\n{}", "Summary:".bold());
    for line in outcome.summary.lines() {
        println!("  - {}", line);
    }

    if !outcome.annotations.is_empty() {
        println!("\n{}", "Flagged cells:".yellow().bold());
        for (cell, annotation) in outcome.annotations.iter() {
            println!("  {}: {}", cell, annotation.joined().yellow());
        }
    }

    println!("\nOutput written to: {}", destination.display());
    println!("{}", "═".repeat(60));
}

fn print_json_report(outcome: &ValidationOutcome, destination: &Path) -> Result<()> {
    let flagged: Vec<_> = outcome
        .annotations
        .iter()
        .map(|(cell, annotation)| {
            json!({
                "row": cell.row,
                "column": cell.column,
                "messages": annotation.messages,
            })
        })
        .collect();

    let output = json!({
        "profile": outcome.profile,
        "passed": outcome.passed(),
        "total_issues": outcome.total_issues(),
        "summary": outcome.summary.to_strings(),
        "flagged_cells": flagged,
        "output": destination.display().to_string(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
