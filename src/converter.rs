use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cleaner::{check_required_columns, clean};
use crate::config::{default_output_path, ConvertOptions};
use crate::error::SchemaError;
use crate::progress::{ConversionProgress, Stage};
use crate::reader::read_table;
use crate::render::render;
use crate::reveal::reveal_in_file_manager;
use crate::schema::{detect_with_prefix, FolderSchema};
use crate::stats::{analyze, TreeStats};
use crate::table::Table;
use crate::tree::{build, TreeNode};
use crate::verify::verify_file;

/// Tree built from a table, before rendering.
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub schema: FolderSchema,
    pub tree: TreeNode,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// Everything produced by one in-memory conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub schema: FolderSchema,
    pub tree: TreeNode,
    pub document: String,
    pub stats: TreeStats,
}

/// Outcome of a file-to-file run.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub stats: TreeStats,
    pub written: bool,
    pub verified: bool,
}

/// Schema and statistics of an input, without writing anything.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub headers: Vec<String>,
    pub folder_columns: FolderSchema,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub stats: TreeStats,
}

pub struct Converter {
    options: ConvertOptions,
    progress: ConversionProgress,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        debug!("Options: {}", options.description());
        let progress = ConversionProgress::new(options.show_progress);
        Ok(Self { options, progress })
    }

    /// Check columns, detect folders, clean rows and fold them into a tree.
    ///
    /// A missing title or URL column fails before any row is touched.
    pub fn build_tree(&self, table: &Table) -> Result<BuiltTree, SchemaError> {
        let title = self.options.title_column.as_str();
        let url = self.options.url_column.as_str();

        self.progress.update(Stage::Validating);
        check_required_columns(table, title, url)?;

        self.progress.update(Stage::Analyzing);
        let schema = detect_with_prefix(table.headers(), &self.options.folder_prefix);
        if schema.is_empty() {
            info!("📁 No folder columns found; all bookmarks go to the top level");
        } else {
            info!(
                "📁 Folder levels: {}",
                schema.column_names().collect::<Vec<_>>().join(", ")
            );
        }

        self.progress.update(Stage::Cleaning);
        let cleaned = clean(table.rows(), title, url, &schema);
        info!("🧹 Kept {} of {} row(s)", cleaned.len(), table.len());

        self.progress.update(Stage::Building);
        let tree = build(&cleaned, title, url, &schema);

        Ok(BuiltTree {
            schema,
            tree,
            rows_read: table.len(),
            rows_kept: cleaned.len(),
        })
    }

    /// Full in-memory pipeline: tree, rendered document and statistics.
    pub fn convert_table(&self, table: &Table) -> Result<Conversion, SchemaError> {
        let built = self.build_tree(table)?;

        self.progress.update(Stage::Generating);
        let document = render(&built.tree);
        let stats = analyze(&built.tree);

        Ok(Conversion {
            schema: built.schema,
            tree: built.tree,
            document,
            stats,
        })
    }

    /// Read `input`, convert it and write the bookmark file.
    ///
    /// With `dry_run` every phase runs except writing and revealing.
    pub fn run(&self, input: &Path, output: Option<&Path>, dry_run: bool) -> Result<ConversionReport> {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(input, chrono::Local::now()));

        info!("📖 Phase 1: Reading {:?}", input);
        self.progress.update(Stage::Reading);
        let table = match read_table(input, &self.options) {
            Ok(table) => table,
            Err(e) => {
                self.progress.finish_with_error("Failed to read input");
                return Err(e);
            }
        };
        info!("✅ Read {} row(s), {} column(s)", table.len(), table.headers().len());
        if table.is_empty() {
            warn!("⚠️  No data rows below header row {}", self.options.header_row);
        }

        info!("🌳 Phase 2: Building bookmark tree");
        let conversion = match self.convert_table(&table) {
            Ok(conversion) => conversion,
            Err(e) => {
                self.progress.finish_with_error("Column check failed");
                return Err(e.into());
            }
        };

        if conversion.tree.is_empty() {
            warn!("⚠️  No row had a title or URL; the bookmark file will be empty");
        }
        debug!(
            "{} folder level(s), {} top-level folder(s), {} top-level bookmark(s)",
            conversion.schema.len(),
            conversion.tree.folders().len(),
            conversion.tree.bookmarks().len()
        );

        if dry_run {
            info!("🏃 Dry run mode - {:?} will not be written", output);
            self.progress.finish_with_success("Dry run complete");
            return Ok(ConversionReport {
                output,
                stats: conversion.stats,
                written: false,
                verified: false,
            });
        }

        info!("💾 Phase 3: Writing {:?}", output);
        self.progress.update(Stage::Saving);
        if let Err(e) = std::fs::write(&output, &conversion.document)
            .with_context(|| format!("Failed to write {}", output.display()))
        {
            self.progress.finish_with_error("Failed to write output");
            return Err(e);
        }

        info!("🔍 Phase 4: Post-write verification");
        let verified = match verify_file(&output, &conversion.stats) {
            Ok(ok) => ok,
            Err(e) => {
                warn!("⚠️  Verification skipped: {}", e);
                false
            }
        };

        if self.options.reveal {
            reveal_in_file_manager(&output);
        }

        self.progress.update(Stage::Done);
        self.progress.finish_with_success("Conversion complete");

        Ok(ConversionReport {
            output,
            stats: conversion.stats,
            written: true,
            verified,
        })
    }

    /// Read `input` and report its folder schema and statistics.
    pub fn inspect(&self, input: &Path) -> Result<Inspection> {
        self.progress.update(Stage::Reading);
        let table = read_table(input, &self.options)?;

        let built = self.build_tree(&table)?;
        let stats = analyze(&built.tree);
        self.progress.finish_with_success("Inspection complete");

        Ok(Inspection {
            headers: table.headers().to_vec(),
            folder_columns: built.schema,
            rows_read: built.rows_read,
            rows_kept: built.rows_kept,
            stats,
        })
    }
}
