//! Google Drive URL conventions and folder-id extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix of every canonical folder listing URL.
pub const FOLDERS_URL: &str = "https://drive.google.com/drive/folders/";

/// Prefix of every direct file fetch URL.
pub const FILES_URL: &str = "https://drive.google.com/uc?id=";

/// MIME type Drive uses to mark a child row as a folder.
pub const FOLDER_TYPE: &str = "application/vnd.google-apps.folder";

static FOLDER_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://drive\.google\.com/drive/(?:u/\d+/)?folders/([A-Za-z0-9_-]+)")
        .expect("valid regex")
});

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{10,}$").expect("valid regex"));

/// Builds the canonical listing URL for a folder id.
#[must_use]
pub fn folder_url(id: &str) -> String {
    format!("{FOLDERS_URL}{id}")
}

/// Builds the direct fetch URL for a file id.
#[must_use]
pub fn file_url(id: &str) -> String {
    format!("{FILES_URL}{id}")
}

/// Extracts the folder id from a canonical listing URL.
///
/// The id is everything after the fixed folder-URL prefix. Only URLs
/// constructed by [`folder_url`] are expected here; anything shorter than the
/// prefix yields an empty id.
#[must_use]
pub fn folder_id(url: &str) -> &str {
    url.get(FOLDERS_URL.len()..).unwrap_or("")
}

/// Parses user input into a folder id.
///
/// Accepts a canonical folder URL (optionally with a `/u/N/` segment, query
/// string, or fragment appended by the Drive web UI) or a bare folder id.
/// Returns `None` if the input is neither.
#[must_use]
pub fn parse_folder_input(input: &str) -> Option<String> {
    let input = input.trim();
    if let Some(caps) = FOLDER_URL_RE.captures(input) {
        return Some(caps[1].to_string());
    }
    if BARE_ID_RE.is_match(input) {
        return Some(input.to_string());
    }
    None
}
