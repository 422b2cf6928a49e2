//! Folder/bookmark tree built from spreadsheet rows.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::schema::FolderSchema;
use crate::table::Row;

pub const UNTITLED_BOOKMARK: &str = "Untitled Bookmark";
pub const EMPTY_URL: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkEntry {
    pub title: String,
    pub url: String,
}

/// A named child folder of a [`TreeNode`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Folder {
    pub name: String,
    pub node: TreeNode,
}

/// A folder's contents: its own bookmarks, then its child folders.
///
/// Both sequences keep insertion order. Child names are unique per node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeNode {
    bookmarks: Vec<BookmarkEntry>,
    folders: Vec<Folder>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookmarks(&self) -> &[BookmarkEntry] {
        &self.bookmarks
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    #[cfg(test)]
    pub fn folder(&self, name: &str) -> Option<&TreeNode> {
        self.index.get(name).map(|&i| &self.folders[i].node)
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty() && self.folders.is_empty()
    }

    pub fn push_bookmark(&mut self, entry: BookmarkEntry) {
        self.bookmarks.push(entry);
    }

    /// The child folder called `name`, appended at the end if it does not exist yet.
    pub fn folder_mut_or_insert(&mut self, name: &str) -> &mut TreeNode {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.folders.push(Folder {
                    name: name.to_string(),
                    node: TreeNode::new(),
                });
                let idx = self.folders.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.folders[idx].node
    }
}

/// Folder path for one row: folder cells in depth order, stopping at the first blank.
pub fn folder_path(row: &Row, schema: &FolderSchema) -> Vec<String> {
    schema
        .column_names()
        .map(|column| row.text(column))
        .take_while(Option::is_some)
        .flatten()
        .collect()
}

/// Entry for a row, or `None` when both title and URL are blank.
pub fn bookmark_entry(row: &Row, title_field: &str, url_field: &str) -> Option<BookmarkEntry> {
    let title = row.text(title_field);
    let url = row.text(url_field);
    if title.is_none() && url.is_none() {
        return None;
    }

    Some(BookmarkEntry {
        title: title.unwrap_or_else(|| UNTITLED_BOOKMARK.to_string()),
        url: url.unwrap_or_else(|| EMPTY_URL.to_string()),
    })
}

/// Fold rows, in order, into a single tree rooted at "no folder".
pub fn build(rows: &[Row], title_field: &str, url_field: &str, schema: &FolderSchema) -> TreeNode {
    let mut root = TreeNode::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(entry) = bookmark_entry(row, title_field, url_field) else {
            skipped += 1;
            continue;
        };

        let mut node = &mut root;
        for folder in folder_path(row, schema) {
            node = node.folder_mut_or_insert(&folder);
        }
        node.push_bookmark(entry);
    }

    if skipped > 0 {
        debug!("Skipped {} row(s) with neither title nor URL while building", skipped);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::detect;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn titles(node: &TreeNode) -> Vec<&str> {
        node.bookmarks().iter().map(|b| b.title.as_str()).collect()
    }

    fn folder_names(node: &TreeNode) -> Vec<&str> {
        node.folders().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_build_reference_example() {
        let schema = detect(&["Title", "URL", "FolderL1", "FolderL2"]);
        let rows = vec![
            row(&[("Title", "A"), ("URL", "http://a"), ("FolderL1", "Work")]),
            row(&[("Title", "B"), ("URL", "http://b"), ("FolderL1", "Work"), ("FolderL2", "Sub")]),
            row(&[("Title", ""), ("URL", "http://c")]),
        ];

        let root = build(&rows, "Title", "URL", &schema);

        assert_eq!(
            root.bookmarks(),
            &[BookmarkEntry {
                title: UNTITLED_BOOKMARK.to_string(),
                url: "http://c".to_string()
            }]
        );
        assert_eq!(folder_names(&root), vec!["Work"]);

        let work = root.folder("Work").unwrap();
        assert_eq!(titles(work), vec!["A"]);
        assert_eq!(folder_names(work), vec!["Sub"]);

        let sub = work.folder("Sub").unwrap();
        assert_eq!(titles(sub), vec!["B"]);
        assert!(sub.folders().is_empty());
    }

    #[test]
    fn test_first_gap_terminates_path() {
        let schema = detect(&["FolderL1", "FolderL2", "FolderL3"]);
        let rows = vec![row(&[
            ("Title", "A"),
            ("FolderL1", "Top"),
            ("FolderL2", "  "),
            ("FolderL3", "Deep"),
        ])];

        let root = build(&rows, "Title", "URL", &schema);
        let top = root.folder("Top").unwrap();
        assert_eq!(titles(top), vec!["A"]);
        assert!(top.folders().is_empty());
    }

    #[test]
    fn test_blank_first_level_lands_at_root() {
        let schema = detect(&["FolderL1", "FolderL2"]);
        let rows = vec![row(&[("Title", "A"), ("FolderL1", ""), ("FolderL2", "Ignored")])];
        let root = build(&rows, "Title", "URL", &schema);
        assert_eq!(titles(&root), vec!["A"]);
        assert!(root.folders().is_empty());
    }

    #[test]
    fn test_child_order_is_first_occurrence() {
        let schema = detect(&["FolderL1"]);
        let rows = vec![
            row(&[("Title", "1"), ("FolderL1", "Zeta")]),
            row(&[("Title", "2"), ("FolderL1", "Alpha")]),
            row(&[("Title", "3"), ("FolderL1", "Zeta")]),
            row(&[("Title", "4"), ("FolderL1", "Mid")]),
        ];
        let root = build(&rows, "Title", "URL", &schema);
        assert_eq!(folder_names(&root), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(titles(root.folder("Zeta").unwrap()), vec!["1", "3"]);
    }

    #[test]
    fn test_folder_names_are_trimmed() {
        let schema = detect(&["FolderL1"]);
        let rows = vec![
            row(&[("Title", "1"), ("FolderL1", " Work ")]),
            row(&[("Title", "2"), ("FolderL1", "Work")]),
        ];
        let root = build(&rows, "Title", "URL", &schema);
        assert_eq!(folder_names(&root), vec!["Work"]);
        assert_eq!(titles(root.folder("Work").unwrap()), vec!["1", "2"]);
    }

    #[test]
    fn test_placeholders_for_blank_fields() {
        let schema = FolderSchema::default();
        let rows = vec![
            row(&[("Title", "Only title"), ("URL", " ")]),
            row(&[("URL", " http://x ")]),
        ];
        let root = build(&rows, "Title", "URL", &schema);
        assert_eq!(
            root.bookmarks(),
            &[
                BookmarkEntry {
                    title: "Only title".into(),
                    url: EMPTY_URL.into()
                },
                BookmarkEntry {
                    title: UNTITLED_BOOKMARK.into(),
                    url: "http://x".into()
                },
            ]
        );
    }

    #[test]
    fn test_row_without_title_or_url_is_noop() {
        let schema = FolderSchema::default();
        let rows = vec![row(&[("Title", ""), ("URL", "")])];
        let root = build(&rows, "Title", "URL", &schema);
        assert!(root.is_empty());
    }

    #[test]
    fn test_blank_row_creates_no_folders() {
        let schema = detect(&["FolderL1", "FolderL2"]);
        let rows = vec![
            row(&[("Title", ""), ("URL", " "), ("FolderL1", "Ghost"), ("FolderL2", "Deeper")]),
            row(&[("Title", "A"), ("FolderL1", "Work")]),
        ];
        let root = build(&rows, "Title", "URL", &schema);
        assert_eq!(folder_names(&root), vec!["Work"]);
        assert!(root.folder("Ghost").is_none());

        let only_blank = build(&rows[..1], "Title", "URL", &schema);
        assert!(only_blank.is_empty());
    }

    #[test]
    fn test_numeric_folder_names() {
        let schema = detect(&["FolderL1"]);
        let mut r = row(&[("Title", "Report")]);
        r.set("FolderL1", 2024.0);
        let root = build(&[r], "Title", "URL", &schema);
        assert_eq!(folder_names(&root), vec!["2024"]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::schema::detect;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[a-c]{1,2}"]
    }

    proptest! {
        #[test]
        fn prop_path_stops_at_first_gap(segments in proptest::collection::vec(segment(), 1..6)) {
            let headers: Vec<String> = (1..=segments.len()).map(|i| format!("FolderL{}", i)).collect();
            let schema = detect(&headers);

            let mut row = Row::new();
            for (h, s) in headers.iter().zip(&segments) {
                row.set(h.as_str(), s.as_str());
            }

            let expected: Vec<String> = segments.iter().take_while(|s| !s.is_empty()).cloned().collect();
            prop_assert_eq!(folder_path(&row, &schema), expected);
        }

        #[test]
        fn prop_bookmark_order_matches_row_order(count in 0usize..30) {
            let schema = FolderSchema::default();
            let rows: Vec<Row> = (0..count)
                .map(|i| [("Title", i.to_string())].into_iter().collect::<Row>())
                .collect();
            let root = build(&rows, "Title", "URL", &schema);
            let got: Vec<String> = root.bookmarks().iter().map(|b| b.title.clone()).collect();
            let want: Vec<String> = (0..count).map(|i| i.to_string()).collect();
            prop_assert_eq!(got, want);
        }
    }
}
