//! Error types for the drive-dl library.

use thiserror::Error;

/// Errors that can occur while listing or downloading a shared folder.
#[derive(Error, Debug)]
pub enum Error {
    /// No script block containing the embedded listing data was found.
    #[error("embedded listing data not found in page")]
    StructureNotFound,

    /// The marker script block was found but the payload literal was missing.
    #[error("listing payload not found in marker script block")]
    PayloadNotFound,

    /// The payload was present but did not decode as JSON.
    #[error("malformed listing payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The page title did not yield a folder name.
    #[error("could not parse folder name from page title")]
    TitleUnparseable,

    /// A child row in the decoded listing had an unexpected shape.
    #[error("malformed listing entry at row {index}")]
    MalformedEntry {
        /// Zero-based index of the bad row within its listing.
        index: usize,
    },

    /// A folder listing page could not be fetched.
    #[error("failed to fetch listing page {url}: {reason}")]
    FetchFailed {
        /// URL of the listing page.
        url: String,
        /// Status line or transport error description.
        reason: String,
    },

    /// A file transfer failed during plan execution.
    #[error("file transfer failed for {id} -> {path}: {reason}")]
    FileTransferFailed {
        /// Remote id of the file.
        id: String,
        /// Local destination path.
        path: String,
        /// Status line or transport error description.
        reason: String,
    },

    /// Folder nesting exceeded the configured maximum depth.
    #[error("folder nesting exceeded maximum depth of {max_depth}")]
    MaxDepthExceeded {
        /// The configured depth limit that was hit.
        max_depth: usize,
    },

    /// I/O error during directory or file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for drive-dl operations.
pub type Result<T> = std::result::Result<T, Error>;
