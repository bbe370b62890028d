//! File system abstraction for testability.

use async_trait::async_trait;
use std::path::Path;

/// Abstraction over the directory side effects of plan execution.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Creates a directory and all missing parents. Already-existing
    /// directories are not an error.
    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Checks if a file exists at the given path.
    async fn file_exists(&self, path: &Path) -> bool;
}

/// Default file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem` instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
