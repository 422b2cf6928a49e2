//! Spreadsheet decoding: CSV via `csv`, workbooks via `calamine`.

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use crate::config::ConvertOptions;
use crate::error::ReadError;
use crate::table::{Cell, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Workbook,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ReadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(InputFormat::Workbook),
            _ => Err(ReadError::UnsupportedFormat(ext)),
        }
    }
}

/// Decode `path` into a [`Table`], using the header row from `options`.
pub fn read_table(path: &Path, options: &ConvertOptions) -> Result<Table> {
    let raw_rows = match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv_rows(path)?,
        InputFormat::Workbook => read_workbook_rows(path, options.sheet.as_deref())?,
    };
    debug!("Decoded {} raw row(s) from {:?}", raw_rows.len(), path);

    Ok(split_header(raw_rows, options.header_row)?)
}

/// Use row `header_row` (1-based) as headers and everything below it as data.
pub fn split_header(mut raw_rows: Vec<Vec<Cell>>, header_row: usize) -> Result<Table, ReadError> {
    if header_row == 0 || header_row > raw_rows.len() {
        return Err(ReadError::HeaderRowOutOfRange {
            row: header_row,
            available: raw_rows.len(),
        });
    }

    let data = raw_rows.split_off(header_row);
    let headers = raw_rows
        .pop()
        .unwrap_or_default()
        .iter()
        .map(|cell| cell.raw_text().trim_start_matches('\u{feff}').to_string())
        .collect();

    Ok(Table::from_records(headers, data))
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open csv: {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse csv record {}", idx + 1))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(rows)
}

fn read_workbook_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(ReadError::SheetNotFound(name.to_string()).into());
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ReadError::NoSheets)?,
    };
    debug!("Reading sheet '{}'", sheet_name);

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    // calamine ranges start at the first used cell; pad back to A1 so that
    // header row numbers match what the user sees in the spreadsheet
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = (0..start_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells: Vec<Cell> = (0..start_col).map(|_| Cell::Empty).collect();
        cells.extend(row.iter().map(data_to_cell));
        rows.push(cells);
    }

    Ok(rows)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::String(v) => Cell::Text(v.to_string()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(v) => Cell::Text(v.to_string()),
        Data::DateTime(v) => match v.as_datetime() {
            Some(dt) => Cell::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Cell::Text(v.to_string()),
        },
        Data::DateTimeIso(v) => Cell::Text(v.to_string()),
        Data::DurationIso(v) => Cell::Text(v.to_string()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}
