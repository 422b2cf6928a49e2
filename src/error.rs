use thiserror::Error;

/// Raised when the input table cannot be converted at all.
///
/// Checked before any row is cleaned or folded into the tree, so a run that
/// fails here produces no tree and no document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("required column(s) not found: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("header row must be 1 or greater (got {0})")]
    InvalidHeaderRow(usize),

    #[error("{0} column name must not be empty")]
    EmptyColumnName(&'static str),

    #[error("folder column prefix must not be empty")]
    EmptyFolderPrefix,

    #[error("title and URL columns must differ (both are '{0}')")]
    SameColumn(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("unsupported input format '{0}' (expected .csv, .xlsx, .xlsm, .xls, .xlsb or .ods)")]
    UnsupportedFormat(String),

    #[error("header row {row} is beyond the end of the input ({available} row(s))")]
    HeaderRowOutOfRange { row: usize, available: usize },

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("workbook contains no sheets")]
    NoSheets,
}
