//! Sheet import.
//!
//! Reads the first worksheet of a workbook (or a CSV file) into a
//! [`RecordTable`]. The first row is the header; every other row becomes a
//! record with one cell per header column. Cells are normalized to text so the
//! rule engine sees the same values regardless of the source format.

use crate::format::{detect_sheet_format, SheetFormat};
use crate::{IoError, Result};
use avc_core::{CellValue, Record, RecordTable};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads a sheet with automatic format detection.
///
/// ```no_run
/// use avc_io::read_table;
/// use std::collections::{HashMap, HashSet};
/// use std::path::Path;
///
/// let table = read_table(Path::new("assets.xlsx")).unwrap();
/// println!("Loaded {} rows", table.len());
/// ```
pub fn read_table(path: &Path) -> Result<RecordTable> {
    let table = match detect_sheet_format(path)? {
        SheetFormat::Workbook => read_workbook(path)?,
        SheetFormat::Csv => read_csv(path)?,
    };

    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "Loaded sheet"
    );
    Ok(table)
}

/// Reads the first worksheet of any workbook calamine supports.
pub fn read_workbook(path: &Path) -> Result<RecordTable> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IoError::NoSheets)?;
    debug!(sheet = %sheet_name, "Reading first worksheet");

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        return Ok(RecordTable::empty());
    };
    let columns = header_names(header.iter().map(cell_text));

    let mut table = RecordTable::new(columns.clone());
    for row in rows {
        let record: Record = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let value = row.get(idx).map(cell_value).unwrap_or_default();
                (column.clone(), value)
            })
            .collect();
        table.add_row(record);
    }

    Ok(table)
}

/// Reads a CSV file with a header row.
pub fn read_csv(path: &Path) -> Result<RecordTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns = header_names(reader.headers()?.iter().map(str::to_string));

    let mut table = RecordTable::new(columns.clone());
    for result in reader.records() {
        let row = result?;
        let record: Record = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let value = match row.get(idx) {
                    Some(field) if !field.is_empty() => CellValue::text(field),
                    _ => CellValue::Empty,
                };
                (column.clone(), value)
            })
            .collect();
        table.add_row(record);
    }

    Ok(table)
}

/// Trims header names; blank headers get a positional placeholder.
///
/// Repeated names are suffixed `.1`, `.2`, ... in order of appearance so every
/// column keeps its own cell in a [`Record`].
fn header_names(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (idx, name) in raw.enumerate() {
        let name = name.trim();
        let base = if name.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.to_string()
        };

        let mut unique = base.clone();
        while taken.contains(&unique) {
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            unique = format!("{}.{}", base, count);
        }
        if unique != base {
            debug!(header = %base, renamed = %unique, "Duplicate header renamed");
        }
        taken.insert(unique.clone());
        names.push(unique);
    }
    names
}

fn cell_text(cell: &Data) -> String {
    cell_value(cell).display().to_string()
}

/// Normalizes one workbook cell to text.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(f) => CellValue::from(*f),
        Data::Int(i) => CellValue::from(*i),
        Data::Bool(b) => CellValue::text(if *b { "True" } else { "False" }),
        Data::Error(e) => CellValue::text(e.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::text(value.format(DATETIME_FORMAT).to_string()),
            None => CellValue::from(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::text(iso_datetime(s)),
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

fn iso_datetime(raw: &str) -> String {
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return value.format(DATETIME_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format!("{} 00:00:00", date.format("%Y-%m-%d"));
    }
    raw.to_string()
}
