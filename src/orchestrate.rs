//! Sequential execution of a download plan.

use std::path::Path;
use std::time::Instant;

use crate::error::Result;
use crate::fetch::FileFetcher;
use crate::fs::{FileSystem, TokioFileSystem};
use crate::plan::Action;
use crate::stats::RunStats;

/// Trait for receiving progress updates during plan execution.
///
/// All methods have default no-op implementations for convenience.
pub trait RunProgress: Send + Sync {
    /// Called after a directory has been created.
    fn on_mkdir(&self, _path: &Path) {}

    /// Called when a file fetch starts.
    fn on_fetch_start(&self, _id: &str, _path: &Path) {}

    /// Called when a file fetch completes successfully.
    fn on_fetch_complete(&self, _path: &Path, _bytes: u64) {}

    /// Called when an action fails, just before the run aborts.
    fn on_error(&self, _path: &Path, _error: &str) {}
}

/// A null progress implementation that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl RunProgress for NoProgress {}

/// Executes plan actions strictly in order through injected collaborators.
///
/// The baseline is intentionally sequential: actions execute, and therefore
/// can fail, in exactly plan order, which keeps partial-failure semantics
/// trivially deterministic.
pub struct Orchestrator<F: FileFetcher, S: FileSystem = TokioFileSystem> {
    fetcher: F,
    fs: S,
}

impl<F: FileFetcher> Orchestrator<F, TokioFileSystem> {
    /// Creates an orchestrator with the default file system.
    #[must_use]
    pub const fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            fs: TokioFileSystem,
        }
    }
}

impl<F: FileFetcher, S: FileSystem> Orchestrator<F, S> {
    /// Creates an orchestrator with a custom file system implementation.
    #[must_use]
    pub const fn with_fs(fetcher: F, fs: S) -> Self {
        Self { fetcher, fs }
    }

    /// Runs `actions` in order, aborting on the first failure.
    ///
    /// Directory creation is idempotent. A failed fetch leaves everything
    /// already written on disk; nothing is retried or rolled back.
    ///
    /// # Errors
    ///
    /// Propagates the first action failure unchanged.
    pub async fn run(&self, actions: &[Action], progress: &dyn RunProgress) -> Result<RunStats> {
        let start = Instant::now();
        let mut stats = RunStats::new();

        for action in actions {
            match action {
                Action::MkDir(path) => {
                    if let Err(e) = self.fs.create_dir_all(path).await {
                        progress.on_error(path, &e.to_string());
                        return Err(e.into());
                    }
                    progress.on_mkdir(path);
                    stats.dirs_created += 1;
                }
                Action::FetchFile { id, path } => {
                    if self.fs.file_exists(path).await {
                        // Duplicate sibling names are served as-is; the last
                        // fetch to a path wins.
                        log::debug!("overwriting existing file {}", path.display());
                    }
                    progress.on_fetch_start(id, path);
                    match self.fetcher.fetch_file(id, path).await {
                        Ok(bytes) => {
                            progress.on_fetch_complete(path, bytes);
                            stats.files_fetched += 1;
                            stats.bytes_fetched += bytes;
                        }
                        Err(e) => {
                            progress.on_error(path, &e.to_string());
                            return Err(e);
                        }
                    }
                }
            }
        }

        stats.elapsed = start.elapsed();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records fetch calls and fails on a configured id.
    struct MockFileFetcher {
        calls: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl MockFileFetcher {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(id: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(id.to_string()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FileFetcher for MockFileFetcher {
        async fn fetch_file(&self, id: &str, dest: &Path) -> Result<u64> {
            self.calls.lock().unwrap().push(id.to_string());
            if self.fail_on.as_deref() == Some(id) {
                return Err(Error::FileTransferFailed {
                    id: id.to_string(),
                    path: dest.display().to_string(),
                    reason: "mock failure".to_string(),
                });
            }
            Ok(100)
        }
    }

    /// Records directory creations without touching the disk.
    struct MockFileSystem {
        created: Mutex<Vec<PathBuf>>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
            }
        }

        fn created(&self) -> Vec<PathBuf> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FileSystem for MockFileSystem {
        async fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
            self.created.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        async fn file_exists(&self, _path: &Path) -> bool {
            false
        }
    }

    fn mkdir(path: &str) -> Action {
        Action::MkDir(PathBuf::from(path))
    }

    fn fetch(id: &str, path: &str) -> Action {
        Action::FetchFile {
            id: id.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[tokio::test]
    async fn run_executes_actions_in_order() {
        let fetcher = MockFileFetcher::new();
        let fs = MockFileSystem::new();
        let orchestrator = Orchestrator::with_fs(fetcher, fs);

        let actions = vec![
            mkdir("root"),
            mkdir("root/sub"),
            fetch("idA", "root/sub/fileA"),
            fetch("idB", "root/fileB"),
        ];
        let stats = orchestrator.run(&actions, &NoProgress).await.unwrap();

        assert_eq!(stats.dirs_created, 2);
        assert_eq!(stats.files_fetched, 2);
        assert_eq!(stats.bytes_fetched, 200);
        assert_eq!(
            orchestrator.fs.created(),
            vec![PathBuf::from("root"), PathBuf::from("root/sub")]
        );
        assert_eq!(orchestrator.fetcher.calls(), vec!["idA", "idB"]);
    }

    #[tokio::test]
    async fn run_aborts_on_first_fetch_failure() {
        let fetcher = MockFileFetcher::failing_on("idBad");
        let fs = MockFileSystem::new();
        let orchestrator = Orchestrator::with_fs(fetcher, fs);

        let actions = vec![
            mkdir("root"),
            fetch("idBad", "root/broken"),
            fetch("idNever", "root/unreached"),
        ];
        let result = orchestrator.run(&actions, &NoProgress).await;

        assert!(matches!(result, Err(Error::FileTransferFailed { .. })));
        // First action's side effect persists, third never executes.
        assert_eq!(orchestrator.fs.created(), vec![PathBuf::from("root")]);
        assert_eq!(orchestrator.fetcher.calls(), vec!["idBad"]);
    }

    #[tokio::test]
    async fn run_empty_plan() {
        let orchestrator = Orchestrator::with_fs(MockFileFetcher::new(), MockFileSystem::new());
        let stats = orchestrator.run(&[], &NoProgress).await.unwrap();
        assert_eq!(stats.dirs_created, 0);
        assert_eq!(stats.files_fetched, 0);
    }

    #[tokio::test]
    async fn run_reports_progress_events() {
        struct RecordingProgress {
            events: Mutex<Vec<String>>,
        }

        impl RunProgress for RecordingProgress {
            fn on_mkdir(&self, path: &Path) {
                self.events
                    .lock()
                    .unwrap()
                    .push(format!("mkdir {}", path.display()));
            }
            fn on_fetch_start(&self, id: &str, _path: &Path) {
                self.events.lock().unwrap().push(format!("start {id}"));
            }
            fn on_fetch_complete(&self, _path: &Path, bytes: u64) {
                self.events.lock().unwrap().push(format!("done {bytes}"));
            }
            fn on_error(&self, _path: &Path, _error: &str) {
                self.events.lock().unwrap().push("error".to_string());
            }
        }

        let progress = RecordingProgress {
            events: Mutex::new(Vec::new()),
        };
        let orchestrator =
            Orchestrator::with_fs(MockFileFetcher::failing_on("id2"), MockFileSystem::new());
        let actions = vec![mkdir("d"), fetch("id1", "d/a"), fetch("id2", "d/b")];
        let _ = orchestrator.run(&actions, &progress).await;

        assert_eq!(
            progress.events.into_inner().unwrap(),
            vec!["mkdir d", "start id1", "done 100", "start id2", "error"]
        );
    }

    #[tokio::test]
    async fn run_mkdir_on_real_fs_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("tree/nested");
        let orchestrator = Orchestrator::new(MockFileFetcher::new());

        let actions = vec![
            Action::MkDir(target.clone()),
            Action::MkDir(target.clone()),
        ];
        let stats = orchestrator.run(&actions, &NoProgress).await.unwrap();
        assert_eq!(stats.dirs_created, 2);
        assert!(target.is_dir());
    }

    #[test]
    fn no_progress_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoProgress>();
    }
}
