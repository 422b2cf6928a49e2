//! Read-back check for generated bookmark files.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::path::Path;
use tracing::{debug, warn};

use crate::stats::TreeStats;

/// Tag counts found in a parsed bookmark document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentCounts {
    pub bookmarks: usize,
    pub folders: usize,
}

/// Parse a Netscape bookmark document and count its `<A>` and `<H3>` entries.
pub fn count_entries(html: &str) -> DocumentCounts {
    let document = Html::parse_document(html);
    let (Ok(link_selector), Ok(folder_selector)) = (Selector::parse("a"), Selector::parse("h3"))
    else {
        return DocumentCounts::default();
    };

    DocumentCounts {
        bookmarks: document.select(&link_selector).count(),
        folders: document.select(&folder_selector).count(),
    }
}

/// Re-read a written file and compare it with the tree statistics.
///
/// Returns `Ok(true)` when the counts agree. A mismatch is logged, not raised.
pub fn verify_file(path: &Path, stats: &TreeStats) -> Result<bool> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read back {}", path.display()))?;
    let counts = count_entries(&html);

    if counts.bookmarks != stats.total_bookmarks {
        warn!(
            "⚠️  Written file has {} bookmark(s), expected {}",
            counts.bookmarks, stats.total_bookmarks
        );
        return Ok(false);
    }
    if counts.folders != stats.total_folders {
        warn!(
            "⚠️  Written file has {} folder(s), expected {}",
            counts.folders, stats.total_folders
        );
        return Ok(false);
    }

    debug!(
        "✅ Verified {} bookmark(s) and {} folder(s) in {:?}",
        counts.bookmarks, counts.folders, path
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_with_clock;
    use crate::stats::analyze;
    use crate::tree::{BookmarkEntry, TreeNode};

    fn sample_tree() -> TreeNode {
        let mut root = TreeNode::new();
        root.push_bookmark(BookmarkEntry {
            title: "Top <level>".into(),
            url: "http://top".into(),
        });
        let work = root.folder_mut_or_insert("Work & Play");
        work.push_bookmark(BookmarkEntry {
            title: "A".into(),
            url: "http://a".into(),
        });
        work.folder_mut_or_insert("Deep").push_bookmark(BookmarkEntry {
            title: "B".into(),
            url: "http://b".into(),
        });
        root
    }

    #[test]
    fn test_count_entries_matches_tree() {
        let tree = sample_tree();
        let html = render_with_clock(&tree, &|| 0);
        let counts = count_entries(&html);
        assert_eq!(counts, DocumentCounts { bookmarks: 3, folders: 2 });
    }

    #[test]
    fn test_verify_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.html");
        let tree = sample_tree();
        std::fs::write(&path, render_with_clock(&tree, &|| 0)).unwrap();

        assert!(verify_file(&path, &analyze(&tree)).unwrap());
    }

    #[test]
    fn test_verify_file_detects_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.html");
        std::fs::write(&path, render_with_clock(&TreeNode::new(), &|| 0)).unwrap();

        assert!(!verify_file(&path, &analyze(&sample_tree())).unwrap());
    }

    #[test]
    fn test_verify_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let stats = TreeStats::default();
        assert!(verify_file(&dir.path().join("missing.html"), &stats).is_err());
    }
}
