//! Netscape bookmark file rendering.
//!
//! Output layout, per node: its own bookmarks first, then each child folder as
//! an `<H3>` heading followed by a nested `<DL><p>` ... `</DL><p>` list.

use rayon::prelude::*;

use crate::tree::{BookmarkEntry, Folder, TreeNode, EMPTY_URL, UNTITLED_BOOKMARK};

pub const HEADER: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
<TITLE>Bookmarks</TITLE>\n\
<H1>Bookmarks</H1>\n\
<DL><p>\n";

pub const FOOTER: &str = "</DL><p>";

pub const UNTITLED_FOLDER: &str = "Untitled Folder";

const INDENT: &str = "    ";

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Render the whole document, stamping entries with the current time.
pub fn render(root: &TreeNode) -> String {
    render_with_clock(root, &unix_timestamp)
}

/// Render the whole document, reading every timestamp from `clock`.
///
/// `clock` is called once per emitted bookmark or folder.
pub fn render_with_clock<F>(root: &TreeNode, clock: &F) -> String
where
    F: Fn() -> i64 + Sync,
{
    let body = render_node(root, 1, clock);
    let mut document = String::with_capacity(HEADER.len() + body.len() + FOOTER.len() + 1);
    document.push_str(HEADER);
    document.push_str(&body);
    document.push('\n');
    document.push_str(FOOTER);
    document
}

/// Escape text for use inside element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_node<F>(node: &TreeNode, level: usize, clock: &F) -> String
where
    F: Fn() -> i64 + Sync,
{
    let indent = INDENT.repeat(level);

    let mut lines: Vec<String> = node
        .bookmarks()
        .iter()
        .filter_map(|bookmark| render_bookmark(bookmark, &indent, clock))
        .collect();

    // siblings are disjoint subtrees; collect() keeps insertion order
    let folders: Vec<String> = node
        .folders()
        .par_iter()
        .map(|folder| render_folder(folder, level, clock))
        .collect();
    lines.extend(folders);

    lines.join("\n")
}

fn render_bookmark<F>(bookmark: &BookmarkEntry, indent: &str, clock: &F) -> Option<String>
where
    F: Fn() -> i64 + Sync,
{
    let title = escape_html(&bookmark.title);
    let url = escape_html(&bookmark.url);
    if title.is_empty() && url.is_empty() {
        return None;
    }

    let title = if title.is_empty() { UNTITLED_BOOKMARK.to_string() } else { title };
    let url = if url.is_empty() { EMPTY_URL.to_string() } else { url };
    let ts = clock();

    Some(format!(
        "{indent}<DT><A HREF=\"{url}\" ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\">{title}</A>"
    ))
}

fn render_folder<F>(folder: &Folder, level: usize, clock: &F) -> String
where
    F: Fn() -> i64 + Sync,
{
    let indent = INDENT.repeat(level);
    let ts = clock();
    let mut name = escape_html(&folder.name);
    if name.is_empty() {
        name = UNTITLED_FOLDER.to_string();
    }
    let body = render_node(&folder.node, level + 1, clock);

    format!(
        "{indent}<DT><H3 ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\" PERSONAL_TOOLBAR_FOLDER=\"false\">{name}</H3>\n\
         {indent}<DL><p>\n\
         {body}\n\
         {indent}</DL><p>"
    )
}
