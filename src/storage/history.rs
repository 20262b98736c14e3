//! Session history persistence.
//!
//! A most-recent-first log of finished countdowns, capped at
//! [`MAX_SESSIONS`] entries. The whole log is held in memory and written
//! through to a JSON file on every change, mirroring how the rest of the
//! stores work: one small file, rewritten atomically enough for this data.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{Days, Local};
use tracing::warn;

use super::error::StorageError;
use super::SessionSink;
use crate::types::{HistoryStats, SessionRecord};

/// File name within the data directory.
const SESSIONS_FILE: &str = "sessions.json";

/// Maximum number of records kept; the oldest are evicted past this.
pub const MAX_SESSIONS: usize = 100;

/// Persistent session history log.
#[derive(Debug)]
pub struct SessionHistoryStore {
    path: PathBuf,
    sessions: Mutex<Vec<SessionRecord>>,
}

impl SessionHistoryStore {
    /// Opens the history inside the given data directory, loading any
    /// existing log. A missing or corrupt file yields an empty history.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(SESSIONS_FILE);
        let sessions = match std::fs::read(&path) {
            Ok(data) => match serde_json::from_slice::<Vec<SessionRecord>>(&data) {
                Ok(mut sessions) => {
                    sessions.truncate(MAX_SESSIONS);
                    sessions
                }
                Err(e) => {
                    warn!("履歴ファイルの解析に失敗したため、空の履歴で開始します: {}", e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            path,
            sessions: Mutex::new(sessions),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record at the front, evicting the oldest past the cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails; the in-memory log is
    /// updated regardless.
    pub fn append(&self, record: SessionRecord) -> Result<(), StorageError> {
        let snapshot = {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.insert(0, record);
            sessions.truncate(MAX_SESSIONS);
            sessions.clone()
        };
        self.persist(&snapshot)
    }

    /// Erases the entire history.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.sessions.lock().unwrap().clear();
        self.persist(&[])
    }

    /// Returns up to `n` most recent records.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<SessionRecord> {
        let sessions = self.sessions.lock().unwrap();
        sessions.iter().take(n).cloned().collect()
    }

    /// Returns every record, most recent first.
    #[must_use]
    pub fn all(&self) -> Vec<SessionRecord> {
        self.sessions.lock().unwrap().clone()
    }

    /// Returns the number of records in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }

    /// Computes aggregate statistics over completed sessions.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        let sessions = self.sessions.lock().unwrap();
        let completed: Vec<_> = sessions.iter().filter(|s| s.was_completed).collect();

        let completed_count = completed.len();
        let total_secs: u64 = completed.iter().map(|s| s.duration_secs).sum();
        let average_secs = if completed_count > 0 {
            total_secs / completed_count as u64
        } else {
            0
        };

        HistoryStats {
            completed_count,
            total_secs,
            average_secs,
        }
    }

    /// Returns the records from today (local calendar day).
    #[must_use]
    pub fn sessions_today(&self) -> Vec<SessionRecord> {
        let today = Local::now().date_naive();
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.completed_at.date_naive() == today)
            .cloned()
            .collect()
    }

    /// Returns the records from the last seven days.
    #[must_use]
    pub fn sessions_this_week(&self) -> Vec<SessionRecord> {
        let week_ago = Local::now()
            .checked_sub_days(Days::new(7))
            .unwrap_or_else(Local::now);
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.completed_at >= week_ago)
            .cloned()
            .collect()
    }

    fn persist(&self, sessions: &[SessionRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(sessions)
            .map_err(|e| StorageError::ParseFailed(e.to_string()))?;

        std::fs::write(&self.path, json)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionSink for SessionHistoryStore {
    fn record(&self, duration: Duration, was_completed: bool) {
        let record = SessionRecord::new(duration.as_secs(), was_completed);
        if let Err(e) = self.append(record) {
            // The countdown itself must not care about storage failures
            warn!("セッション履歴の保存に失敗しました: {}", e);
        }
    }
}
