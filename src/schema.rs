//! Folder-level column detection.
//!
//! A folder column is named by a fixed prefix followed by a decimal depth,
//! e.g. `FolderL1`, `FolderL2`. The whole header must match; `MyFolderL1` or
//! `FolderL1 (old)` are not folder columns.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_FOLDER_PREFIX: &str = "FolderL";

/// One folder-level column and the depth parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderColumn {
    pub name: String,
    pub depth: u32,
}

/// Folder columns ordered by strictly increasing depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderSchema {
    columns: Vec<FolderColumn>,
}

impl FolderSchema {
    pub fn columns(&self) -> &[FolderColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Detect folder columns using the default `FolderL<digits>` pattern.
#[cfg(test)]
pub fn detect<S: AsRef<str>>(column_names: &[S]) -> FolderSchema {
    detect_with_prefix(column_names, DEFAULT_FOLDER_PREFIX)
}

/// Detect folder columns named `<prefix><digits>`, sorted by depth.
///
/// When two columns resolve to the same depth (`FolderL1` and `FolderL01`),
/// the one appearing first in the header wins and the other is ignored.
pub fn detect_with_prefix<S: AsRef<str>>(column_names: &[S], prefix: &str) -> FolderSchema {
    let pattern = format!("^{}([0-9]+)$", regex::escape(prefix));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("⚠️  Invalid folder column pattern {}: {}", pattern, e);
            return FolderSchema::default();
        }
    };

    let mut columns: Vec<FolderColumn> = Vec::new();

    for name in column_names {
        let name = name.as_ref();
        let Some(caps) = re.captures(name) else {
            continue;
        };

        let depth = match caps[1].parse::<u32>() {
            Ok(depth) => depth,
            Err(_) => {
                warn!("⚠️  Ignoring folder column with out-of-range level: {}", name);
                continue;
            }
        };

        if let Some(existing) = columns.iter().find(|c| c.depth == depth) {
            warn!(
                "⚠️  Folder columns '{}' and '{}' both map to level {}; keeping '{}'",
                existing.name, name, depth, existing.name
            );
            continue;
        }

        columns.push(FolderColumn {
            name: name.to_string(),
            depth,
        });
    }

    columns.sort_by_key(|c| c.depth);
    debug!(
        "Detected {} folder column(s): {:?}",
        columns.len(),
        columns.iter().map(|c| &c.name).collect::<Vec<_>>()
    );

    FolderSchema { columns }
}
