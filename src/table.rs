//! Decoded spreadsheet data handed to the conversion core.
//!
//! A [`Table`] is an ordered header list plus rows keyed by header name. Cells
//! keep the distinction between text, numbers and absent values so the core
//! can decide what counts as blank.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// True for absent values, NaN, and text that trims to nothing.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_none()
    }

    /// The cell as untrimmed text; blank values give an empty string.
    pub fn raw_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.is_nan() => String::new(),
            Cell::Number(n) => format_number(*n),
            Cell::Empty => String::new(),
        }
    }

    /// The cell as trimmed text, or `None` when it is blank.
    pub fn trimmed(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            }
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Empty => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// Integral values print without a fractional part (`2024`, not `2024.0`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One spreadsheet row: column name → cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Cell>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Trimmed, non-blank text of `column`; `None` if the cell is absent or blank.
    pub fn text(&self, column: &str) -> Option<String> {
        self.cells.get(column).and_then(Cell::trimmed)
    }

    pub fn is_blank(&self, column: &str) -> bool {
        self.cells.get(column).map_or(true, Cell::is_blank)
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

/// Decoded input: ordered headers and the data rows below them.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    #[cfg(test)]
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from a raw header record and positional data records.
    ///
    /// Headers are kept verbatim; blank headers become `Unnamed: <index>` and repeated
    /// names get a `.1`, `.2`, ... suffix so every column stays addressable.
    /// Short records are padded with [`Cell::Empty`], extra fields are dropped.
    pub fn from_records(raw_headers: Vec<String>, records: Vec<Vec<Cell>>) -> Self {
        let headers = normalize_headers(raw_headers);
        let rows = records
            .into_iter()
            .map(|record| {
                let mut values = record.into_iter();
                headers
                    .iter()
                    .map(|h| (h.clone(), values.next().unwrap_or(Cell::Empty)))
                    .collect::<Row>()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}
