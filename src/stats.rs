use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::tree::TreeNode;

/// Aggregate counts over a finished tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub total_bookmarks: usize,
    /// Folder nodes in the tree, every branch counted.
    pub total_folders: usize,
    /// Distinct folder names per depth; root's children are depth 0.
    pub folders_per_level: BTreeMap<usize, BTreeSet<String>>,
}

impl TreeStats {
    pub fn has_folders(&self) -> bool {
        !self.folders_per_level.is_empty()
    }

    /// Human-readable report shown after a conversion.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Total bookmarks processed: {}", self.total_bookmarks)];

        if !self.has_folders() {
            lines.push("No folders were created.".to_string());
        } else {
            lines.push("Folders created per level:".to_string());
            for (depth, names) in &self.folders_per_level {
                lines.push(format!("  • L{}: {} folder(s)", depth + 1, names.len()));
            }
        }

        lines.join("\n")
    }
}

/// Walk the tree once and collect [`TreeStats`].
pub fn analyze(root: &TreeNode) -> TreeStats {
    let mut stats = TreeStats::default();
    collect(root, 0, &mut stats);
    stats
}

fn collect(node: &TreeNode, depth: usize, stats: &mut TreeStats) {
    stats.total_bookmarks += node.bookmarks().len();

    for folder in node.folders() {
        stats.total_folders += 1;
        stats
            .folders_per_level
            .entry(depth)
            .or_default()
            .insert(folder.name.clone());
        collect(&folder.node, depth + 1, stats);
    }
}
