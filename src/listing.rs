//! Typed interpretation of a decoded folder listing.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::url::{self, FOLDER_TYPE};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));

/// Whether a listing entry is a nested folder or a terminal file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The entry is a folder and needs its own listing fetch.
    Folder,
    /// The entry is a file that can be fetched directly by id.
    File,
}

/// One child item inside a folder listing, before recursive resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Remote id of the entry.
    pub id: String,
    /// Display name as served.
    pub name: String,
    /// Folder or file.
    pub kind: EntryKind,
}

/// The decoded result of one listing page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    /// Id of the listed folder, derived from its canonical URL.
    pub id: String,
    /// Name of the listed folder, derived from the page title.
    pub name: String,
    /// Child entries in served order.
    pub entries: Vec<Entry>,
}

/// The fields of one child row, pulled out of their fixed positions and
/// validated in one place so a bad row always fails as `MalformedEntry`.
struct RowFields<'a> {
    id: &'a str,
    name: &'a str,
    type_tag: &'a str,
}

impl<'a> RowFields<'a> {
    // Row layout as served: index 0 holds the child id, 2 the display name,
    // 3 the MIME-type-like tag. Intervening and trailing positions carry
    // metadata this system does not consume.
    fn decode(index: usize, row: &'a Value) -> Result<Self> {
        let fields = row.as_array().ok_or(Error::MalformedEntry { index })?;
        let field_str = |at: usize| {
            fields
                .get(at)
                .and_then(Value::as_str)
                .ok_or(Error::MalformedEntry { index })
        };
        Ok(Self {
            id: field_str(0)?,
            name: field_str(2)?,
            type_tag: field_str(3)?,
        })
    }

    fn into_entry(self) -> Entry {
        let kind = if self.type_tag == FOLDER_TYPE {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        Entry {
            id: self.id.to_string(),
            name: self.name.to_string(),
            kind,
        }
    }
}

impl FolderListing {
    /// Interprets a decoded structure plus its source page into a typed
    /// listing.
    ///
    /// The first element of the decoded root array holds the child rows; a
    /// null first element means the folder is empty. The listing's own name
    /// is the leading whitespace-delimited token of the page title (the host
    /// appends suffix text after the folder name), and its id is the suffix
    /// of `self_url` after the canonical folder-URL prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TitleUnparseable`] if the page title yields no name
    /// token, and [`Error::MalformedEntry`] if the decoded root or any child
    /// row has an unexpected shape.
    pub fn parse(page_text: &str, decoded: &Value, self_url: &str) -> Result<Self> {
        let name = page_title_token(page_text)?;
        let id = url::folder_id(self_url).to_string();

        let empty = Vec::new();
        let rows: &[Value] = match decoded {
            Value::Array(elems) => match elems.first() {
                None | Some(Value::Null) => &empty,
                Some(Value::Array(rows)) => rows,
                Some(_) => return Err(Error::MalformedEntry { index: 0 }),
            },
            _ => return Err(Error::MalformedEntry { index: 0 }),
        };

        let entries = rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowFields::decode(index, row).map(RowFields::into_entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { id, name, entries })
    }
}

/// Extracts the folder name from the page title: its leading
/// whitespace-delimited token.
fn page_title_token(page_text: &str) -> Result<String> {
    let document = Html::parse_document(page_text);
    let title: String = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect())
        .unwrap_or_default();
    title
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or(Error::TitleUnparseable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::folder_url;
    use serde_json::json;

    fn page(title: &str) -> String {
        format!("<html><head><title>{title}</title></head><body></body></html>")
    }

    #[test]
    fn parse_listing_with_mixed_entries() {
        let decoded = json!([[
            ["idSub", "x", "Subfolder", FOLDER_TYPE],
            ["idA", "x", "a.txt", "text/plain"],
        ]]);
        let listing = FolderListing::parse(
            &page("Shared - Google Drive"),
            &decoded,
            &folder_url("rootid123"),
        )
        .unwrap();

        assert_eq!(listing.id, "rootid123");
        assert_eq!(listing.name, "Shared");
        assert_eq!(
            listing.entries,
            vec![
                Entry {
                    id: "idSub".to_string(),
                    name: "Subfolder".to_string(),
                    kind: EntryKind::Folder,
                },
                Entry {
                    id: "idA".to_string(),
                    name: "a.txt".to_string(),
                    kind: EntryKind::File,
                },
            ]
        );
    }

    #[test]
    fn parse_preserves_served_order() {
        let decoded = json!([[
            ["id3", 0, "c", "t"],
            ["id1", 0, "a", "t"],
            ["id2", 0, "b", "t"],
        ]]);
        let listing =
            FolderListing::parse(&page("F - Drive"), &decoded, &folder_url("f")).unwrap();
        let ids: Vec<_> = listing.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["id3", "id1", "id2"]);
    }

    #[test]
    fn parse_null_first_element_means_empty() {
        let decoded = json!([null, "trailer"]);
        let listing =
            FolderListing::parse(&page("Empty - Drive"), &decoded, &folder_url("e")).unwrap();
        assert!(listing.entries.is_empty());
        assert_eq!(listing.name, "Empty");
    }

    #[test]
    fn parse_empty_root_array_means_empty() {
        let listing =
            FolderListing::parse(&page("Empty - Drive"), &json!([]), &folder_url("e")).unwrap();
        assert!(listing.entries.is_empty());
    }

    #[test]
    fn parse_title_with_single_token() {
        let listing =
            FolderListing::parse(&page("Solo"), &json!([null]), &folder_url("s")).unwrap();
        assert_eq!(listing.name, "Solo");
    }

    #[test]
    fn parse_title_missing_fails() {
        let result = FolderListing::parse(
            "<html><head></head><body></body></html>",
            &json!([null]),
            &folder_url("x"),
        );
        assert!(matches!(result, Err(Error::TitleUnparseable)));
    }

    #[test]
    fn parse_title_whitespace_only_fails() {
        let result = FolderListing::parse(&page("   "), &json!([null]), &folder_url("x"));
        assert!(matches!(result, Err(Error::TitleUnparseable)));
    }

    #[test]
    fn parse_malformed_row_reports_index() {
        let decoded = json!([[
            ["ok", 0, "name", "type"],
            "not an array",
        ]]);
        let result = FolderListing::parse(&page("T - Drive"), &decoded, &folder_url("t"));
        assert!(matches!(result, Err(Error::MalformedEntry { index: 1 })));
    }

    #[test]
    fn parse_row_with_missing_fields() {
        let decoded = json!([[["onlyid"]]]);
        let result = FolderListing::parse(&page("T - Drive"), &decoded, &folder_url("t"));
        assert!(matches!(result, Err(Error::MalformedEntry { index: 0 })));
    }

    #[test]
    fn parse_row_with_non_string_id() {
        let decoded = json!([[[42, 0, "name", "type"]]]);
        let result = FolderListing::parse(&page("T - Drive"), &decoded, &folder_url("t"));
        assert!(matches!(result, Err(Error::MalformedEntry { index: 0 })));
    }

    #[test]
    fn parse_non_array_root_fails() {
        let result =
            FolderListing::parse(&page("T - Drive"), &json!("scalar"), &folder_url("t"));
        assert!(matches!(result, Err(Error::MalformedEntry { index: 0 })));
    }

    #[test]
    fn folder_kind_requires_exact_type_match() {
        let decoded = json!([[
            ["id1", 0, "almost", "application/vnd.google-apps.folder2"],
        ]]);
        let listing =
            FolderListing::parse(&page("T - Drive"), &decoded, &folder_url("t")).unwrap();
        assert_eq!(listing.entries[0].kind, EntryKind::File);
    }
}
