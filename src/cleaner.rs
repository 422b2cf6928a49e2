use tracing::debug;

use crate::error::SchemaError;
use crate::schema::FolderSchema;
use crate::table::{Cell, Row, Table};

/// Fail fast when the title or URL column is missing from the header.
///
/// Only the columns themselves are checked; blank cells are handled by [`clean`].
pub fn check_required_columns(
    table: &Table,
    title_field: &str,
    url_field: &str,
) -> Result<(), SchemaError> {
    let missing: Vec<String> = [title_field, url_field]
        .into_iter()
        .filter(|field| !table.has_column(field))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns { missing })
    }
}

/// Keep rows that have a title or a URL, and blank-fill folder cells.
///
/// Returns new rows; the input is left untouched. Absent folder cells become
/// empty text so path extraction only sees "empty" or "populated".
pub fn clean(rows: &[Row], title_field: &str, url_field: &str, schema: &FolderSchema) -> Vec<Row> {
    let mut cleaned = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        if row.is_blank(title_field) && row.is_blank(url_field) {
            dropped += 1;
            continue;
        }

        let mut row = row.clone();
        for column in schema.column_names() {
            let absent = match row.get(column) {
                None | Some(Cell::Empty) => true,
                Some(Cell::Number(n)) => n.is_nan(),
                Some(Cell::Text(_)) => false,
            };
            if absent {
                row.set(column, "");
            }
        }
        cleaned.push(row);
    }

    if dropped > 0 {
        debug!("Dropped {} row(s) with neither title nor URL", dropped);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::detect;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_missing_columns_reported() {
        let table = Table::new(vec!["Name".into(), "URL".into()], vec![]);
        let err = check_required_columns(&table, "Title", "URL").unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns {
                missing: vec!["Title".to_string()]
            }
        );
        assert!(err.to_string().contains("Title"));
    }

    #[test]
    fn test_both_columns_missing() {
        let table = Table::new(vec!["Name".into()], vec![]);
        match check_required_columns(&table, "Title", "URL") {
            Err(SchemaError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["Title", "URL"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_required_columns_present_even_if_blank() {
        let table = Table::new(vec!["Title".into(), "URL".into()], vec![Row::new()]);
        assert!(check_required_columns(&table, "Title", "URL").is_ok());
    }

    #[test]
    fn test_clean_drops_rows_without_title_and_url() {
        let schema = detect(&["FolderL1"]);
        let rows = vec![
            row(&[("Title", "A"), ("URL", "")]),
            row(&[("Title", "  "), ("URL", " \t")]),
            row(&[("Title", ""), ("URL", "http://c")]),
            Row::new(),
        ];
        let cleaned = clean(&rows, "Title", "URL", &schema);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].text("Title").as_deref(), Some("A"));
        assert_eq!(cleaned[1].text("URL").as_deref(), Some("http://c"));
    }

    #[test]
    fn test_clean_blank_fills_folder_cells() {
        let schema = detect(&["FolderL1", "FolderL2"]);
        let mut r = row(&[("Title", "A"), ("FolderL1", "Work")]);
        r.set("FolderL2", Cell::Empty);
        let cleaned = clean(&[r.clone()], "Title", "URL", &schema);

        assert_eq!(cleaned[0].get("FolderL1"), Some(&Cell::from("Work")));
        assert_eq!(cleaned[0].get("FolderL2"), Some(&Cell::from("")));
        // input untouched
        assert_eq!(r.get("FolderL2"), Some(&Cell::Empty));
    }

    #[test]
    fn test_numeric_title_counts_as_present() {
        let schema = FolderSchema::default();
        let mut r = Row::new();
        r.set("Title", 42.0);
        assert_eq!(clean(&[r], "Title", "URL", &schema).len(), 1);
    }
}
