//! Statistics for an executed download plan.

use std::time::Duration;

/// Counters accumulated over one plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Number of directories created.
    pub dirs_created: usize,
    /// Number of files fetched successfully.
    pub files_fetched: usize,
    /// Total bytes written by file fetches.
    pub bytes_fetched: u64,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    /// Creates empty run stats.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dirs_created: 0,
            files_fetched: 0,
            bytes_fetched: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the average transfer rate in bytes per second.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn average_speed(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.bytes_fetched as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Returns true if the run performed no work.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dirs_created == 0 && self.files_fetched == 0
    }
}
