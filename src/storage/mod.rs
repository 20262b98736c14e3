//! Persistence for settings and session history.
//!
//! Both stores are small JSON files under the data directory
//! (`~/.oktimer/` by default). The daemon loads them at startup and writes
//! through on every change; the countdown engine only sees the narrow
//! `SessionSink` trait and never waits on or handles storage failures.

mod error;
mod history;
mod settings;

use std::path::PathBuf;
use std::time::Duration;

pub use error::StorageError;
pub use history::{SessionHistoryStore, MAX_SESSIONS};
pub use settings::SettingsStore;

/// Directory name under the home directory.
const DATA_DIR_NAME: &str = ".oktimer";

/// Returns the default data directory, creating it if needed.
///
/// # Errors
///
/// Returns an error if the home directory is unknown or the directory
/// cannot be created.
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let home = dirs::home_dir()
        .ok_or_else(|| StorageError::DataDirUnavailable("ホームディレクトリが不明です".into()))?;
    let dir = home.join(DATA_DIR_NAME);
    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDirUnavailable(format!("{}: {}", dir.display(), e)))?;
    Ok(dir)
}

// ============================================================================
// SessionSink
// ============================================================================

/// Sink the countdown engine records finished sessions into.
///
/// Fire-and-forget: implementations swallow and log their own failures.
pub trait SessionSink: Send + Sync {
    /// Records one finished countdown.
    ///
    /// `was_completed` is false when the session was reset before zero.
    fn record(&self, duration: Duration, was_completed: bool);
}

// ============================================================================
// MockSessionSink
// ============================================================================

/// Mock sink for testing: records calls in memory.
#[derive(Debug, Default)]
pub struct MockSessionSink {
    records: std::sync::Mutex<Vec<(Duration, bool)>>,
}

impl MockSessionSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded (duration, was_completed) pair, in call order.
    #[must_use]
    pub fn recorded(&self) -> Vec<(Duration, bool)> {
        self.records.lock().unwrap().clone()
    }

    /// Returns how many sessions were recorded.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl SessionSink for MockSessionSink {
    fn record(&self, duration: Duration, was_completed: bool) {
        self.records.lock().unwrap().push((duration, was_completed));
    }
}
