use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::ConfigError;
use crate::schema::DEFAULT_FOLDER_PREFIX;

pub const DEFAULT_TITLE_COLUMN: &str = "Title";
pub const DEFAULT_URL_COLUMN: &str = "URL";

/// Conversion options
/// Column names are matched case-sensitively against the header row
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Column holding bookmark titles
    pub title_column: String,

    /// Column holding bookmark URLs
    pub url_column: String,

    /// Folder columns are `<prefix><level>`, e.g. FolderL1
    pub folder_prefix: String,

    /// 1-based row holding the column headers
    pub header_row: usize,

    /// Worksheet to read (workbooks only; None = first sheet)
    pub sheet: Option<String>,

    /// Reveal the written file in the system file manager
    pub reveal: bool,

    /// Show the terminal progress bar
    pub show_progress: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title_column: DEFAULT_TITLE_COLUMN.to_string(),
            url_column: DEFAULT_URL_COLUMN.to_string(),
            folder_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            header_row: 1,
            sheet: None,
            reveal: false,
            show_progress: true,
        }
    }
}

impl ConvertOptions {
    /// Reject option combinations that can never produce a valid conversion
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.header_row == 0 {
            return Err(ConfigError::InvalidHeaderRow(self.header_row));
        }

        if self.title_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName("title"));
        }
        if self.url_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumnName("URL"));
        }

        if self.folder_prefix.is_empty() {
            return Err(ConfigError::EmptyFolderPrefix);
        }

        if self.title_column == self.url_column {
            return Err(ConfigError::SameColumn(self.title_column.clone()));
        }

        // a prefix that also matches the title/URL column would turn it into a folder level
        for column in [&self.title_column, &self.url_column] {
            if let Some(rest) = column.strip_prefix(self.folder_prefix.as_str()) {
                if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                    warn!(
                        "⚠️  Column '{}' also matches the folder prefix '{}'",
                        column, self.folder_prefix
                    );
                }
            }
        }

        Ok(())
    }

    /// One-line description for logs
    pub fn description(&self) -> String {
        let mut parts = vec![
            format!("title='{}'", self.title_column),
            format!("url='{}'", self.url_column),
            format!("folders='{}<n>'", self.folder_prefix),
            format!("header row {}", self.header_row),
        ];
        if let Some(ref sheet) = self.sheet {
            parts.push(format!("sheet '{}'", sheet));
        }
        parts.join(", ")
    }
}

/// `<input dir>/<input stem>_<YYYYmmdd_HHMMSS>.html`
pub fn default_output_path(input: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("bookmarks");
    let file_name = format!("{}_{}.html", stem, now.format("%Y%m%d_%H%M%S"));

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
