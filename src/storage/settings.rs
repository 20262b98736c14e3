//! Settings persistence.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::StorageError;
use crate::types::TimerSettings;

/// File name within the data directory.
const SETTINGS_FILE: &str = "settings.json";

/// Loads and saves `TimerSettings` as a JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store inside the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SETTINGS_FILE),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, falling back to defaults when the file is missing
    /// or unreadable. A corrupt file is logged and replaced by defaults
    /// rather than treated as fatal.
    pub fn load(&self) -> TimerSettings {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(_) => return TimerSettings::default(),
        };

        match serde_json::from_slice::<TimerSettings>(&data) {
            Ok(settings) if settings.validate().is_ok() => settings,
            Ok(_) => {
                warn!("保存された設定が範囲外のため、デフォルトに戻します");
                TimerSettings::default()
            }
            Err(e) => {
                warn!("設定ファイルの解析に失敗したため、デフォルトに戻します: {}", e);
                TimerSettings::default()
            }
        }
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, settings: &TimerSettings) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(settings)
            .map_err(|e| StorageError::ParseFailed(e.to_string()))?;

        std::fs::write(&self.path, json)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", self.path.display(), e)))
    }
}
