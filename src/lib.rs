//! drive-dl - A library for downloading shared Google Drive folders.
//!
//! Drive exposes shared folders only through a consumer web page, with no
//! listing API. This library reconstructs the nested folder/file hierarchy
//! from the obfuscated data embedded in that page, resolves nested folders
//! recursively into a complete in-memory tree, flattens the tree into an
//! ordered plan of filesystem actions, and executes the plan through
//! injected fetch primitives.
//!
//! # Example
//!
//! ```no_run
//! use drive_dl::{
//!     HttpFileFetcher, HttpPageFetcher, NoProgress, Orchestrator, TreeBuilder,
//!     build_http_client, folder_url, plan,
//! };
//!
//! # async fn example() -> drive_dl::Result<()> {
//! // One cookie-enabled client is shared by all fetches.
//! let http = build_http_client()?;
//!
//! // Resolve the remote folder into a tree.
//! let builder = TreeBuilder::new(HttpPageFetcher::new(http.clone()), 32);
//! let tree = builder.build(&folder_url("1ZXEhzbLRLU1giKKRJkjm8N04cO_JoYE2")).await?;
//!
//! // Flatten it into ordered filesystem actions and execute them.
//! let root = std::path::Path::new(".").join(&tree.name);
//! let actions = plan(&tree, &root);
//! let orchestrator = Orchestrator::new(HttpFileFetcher::new(http));
//! let stats = orchestrator.run(&actions, &NoProgress).await?;
//! println!("Fetched {} files", stats.files_fetched);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod format;
pub mod fs;
pub mod listing;
pub mod orchestrate;
pub mod plan;
pub mod stats;
pub mod tree;
pub mod url;

// Re-export main types for convenience
pub use config::{AppConfig, DownloadConfig, PathConfig};
pub use error::{Error, Result};
pub use extract::extract;
pub use fetch::{FileFetcher, HttpFileFetcher, HttpPageFetcher, PageFetcher, build_http_client};
pub use format::{format_bytes, format_duration};
pub use fs::{FileSystem, TokioFileSystem};
pub use listing::{Entry, EntryKind, FolderListing};
pub use orchestrate::{NoProgress, Orchestrator, RunProgress};
pub use plan::{Action, plan};
pub use stats::RunStats;
pub use tree::{FolderNode, TreeBuilder};
pub use url::{
    FILES_URL, FOLDER_TYPE, FOLDERS_URL, file_url, folder_id, folder_url, parse_folder_input,
};
