//! Highlighted export.
//!
//! Writes a [`ProjectedTable`] as a single-sheet workbook: the header row,
//! then one row per record, with flagged cells filled in the highlight colour
//! and every cell aligned as the table's layout says. CSV output carries the
//! annotated text without styling.

use crate::config::ExportConfig;
use crate::{IoError, Result};
use avc_core::Severity;
use avc_validator::{HorizontalAlign, ProjectedTable, TextDirection};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::path::Path;
use tracing::info;

/// Writes `table` to `path`, choosing the format from the extension.
///
/// `.xlsx` gets the styled workbook, `.csv` the plain annotated text.
pub fn write_table(table: &ProjectedTable, config: &ExportConfig, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(IoError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "xlsx" => write_xlsx(table, config, path),
        "csv" => write_csv(table, path),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Writes the styled workbook to `path`.
pub fn write_xlsx(table: &ProjectedTable, config: &ExportConfig, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(table, config)?;
    workbook.save(path)?;

    info!(
        path = %path.display(),
        rows = table.rows.len(),
        highlighted = table.highlighted_count(),
        "Wrote highlighted workbook"
    );
    Ok(())
}

/// Renders the styled workbook in memory.
pub fn to_xlsx_buffer(table: &ProjectedTable, config: &ExportConfig) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table, config)?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes the annotated text as CSV.
pub fn write_csv(table: &ProjectedTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.text.as_str()))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.rows.len(), "Wrote CSV");
    Ok(())
}

fn format_align(align: HorizontalAlign) -> FormatAlign {
    match align {
        HorizontalAlign::Left => FormatAlign::Left,
        HorizontalAlign::Center => FormatAlign::Center,
        HorizontalAlign::Right => FormatAlign::Right,
    }
}

fn build_workbook(table: &ProjectedTable, config: &ExportConfig) -> Result<Workbook> {
    let align = format_align(table.layout.align);
    let plain = Format::new().set_align(align);
    let header = Format::new().set_bold().set_align(align);
    let highlighted = Format::new()
        .set_align(align)
        .set_background_color(Color::RGB(config.highlight_rgb()?));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&config.sheet_name)?;
    worksheet.set_right_to_left(table.layout.direction == TextDirection::RightToLeft);

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, name, &header)?;
    }

    for (row, cells) in table.rows.iter().enumerate() {
        let row = row_index(row + 1)?;
        for (col, cell) in cells.iter().enumerate() {
            let col = column_index(col)?;
            let format = match cell.highlight {
                Some(Severity::Flagged) => &highlighted,
                None => &plain,
            };
            if cell.text.is_empty() {
                worksheet.write_blank(row, col, format)?;
            } else {
                worksheet.write_string_with_format(row, col, &cell.text, format)?;
            }
        }
    }

    Ok(workbook)
}

fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| IoError::UnsupportedFormat(format!("row {} out of range", row)))
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| IoError::UnsupportedFormat(format!("column {} out of range", col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use avc_validator::{Layout, ProjectedCell};

    fn projected() -> ProjectedTable {
        ProjectedTable {
            columns: vec!["final_value".into(), "city".into()],
            rows: vec![vec![
                ProjectedCell {
                    text: "12.5 | Final value must be a non-decimal integer".into(),
                    highlight: Some(Severity::Flagged),
                },
                ProjectedCell {
                    text: String::new(),
                    highlight: None,
                },
            ]],
            layout: Layout::default(),
        }
    }

    #[test]
    fn test_xlsx_buffer_is_a_zip() {
        let bytes = to_xlsx_buffer(&projected(), &ExportConfig::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_colour_fails_before_writing() {
        let config = ExportConfig {
            highlight_color: "not a colour".into(),
            ..ExportConfig::default()
        };
        assert!(matches!(
            to_xlsx_buffer(&projected(), &config),
            Err(IoError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_unsupported_output_extension() {
        let result = write_table(&projected(), &ExportConfig::default(), Path::new("out.ods"));
        assert!(matches!(result, Err(IoError::UnsupportedFormat(ext)) if ext == "ods"));
    }
}
