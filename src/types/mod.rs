//! Core data types for OKTimer.
//!
//! This module defines the data structures used for:
//! - Countdown state management
//! - User settings with validation
//! - Session history records and statistics
//! - IPC request/response serialization

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// No countdown armed; the configured duration is editable
    Idle,
    /// Counting down toward the end instant
    Running,
    /// Frozen mid-countdown; remaining time is snapshotted
    Paused,
    /// Reached zero; waiting for the user to dismiss or snooze
    Completed,
}

impl TimerState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Completed => "completed",
        }
    }

    /// Returns true if the countdown is actively running down.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }

    /// Returns true if a session is in progress (running or paused).
    pub fn session_in_progress(&self) -> bool {
        matches!(self, TimerState::Running | TimerState::Paused)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::Idle
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// User-configurable settings, persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerSettings {
    /// Whether start/completion sounds are played
    pub sound_enabled: bool,
    /// Whether a tick sound is played once per elapsed second
    pub tick_sound_enabled: bool,
    /// Countdown duration armed at startup, in seconds (1-86400)
    pub default_duration_secs: u64,
    /// Duration a snoozed countdown is re-armed with, in seconds (1-3600)
    pub snooze_secs: u64,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            tick_sound_enabled: false,
            default_duration_secs: 300,
            snooze_secs: 300,
        }
    }
}

impl TimerSettings {
    /// Validates the settings.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_duration_secs < 1 || self.default_duration_secs > 86400 {
            return Err("デフォルト時間は1-86400秒の範囲で指定してください".to_string());
        }
        if self.snooze_secs < 1 || self.snooze_secs > 3600 {
            return Err("スヌーズ時間は1-3600秒の範囲で指定してください".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// SessionRecord
// ============================================================================

/// One finished countdown, persisted in the session history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// Duration the countdown was armed with, in seconds
    pub duration_secs: u64,
    /// Wall-clock time the session ended (completion or reset)
    pub completed_at: DateTime<Local>,
    /// False if the countdown was reset before reaching zero
    pub was_completed: bool,
}

impl SessionRecord {
    /// Creates a record stamped with the current local time.
    pub fn new(duration_secs: u64, was_completed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            duration_secs,
            completed_at: Local::now(),
            was_completed,
        }
    }

    /// Formats the duration as "5m 30s" / "45s".
    pub fn formatted_duration(&self) -> String {
        let minutes = self.duration_secs / 60;
        let seconds = self.duration_secs % 60;
        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

// ============================================================================
// HistoryStats
// ============================================================================

/// Aggregate statistics over the session history.
///
/// Only records with `was_completed == true` count toward the totals;
/// abandoned sessions appear in the log but not in the statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    /// Number of completed sessions
    pub completed_count: usize,
    /// Sum of completed session durations, in seconds
    pub total_secs: u64,
    /// Mean completed session duration, in seconds (0 when empty)
    pub average_secs: u64,
}

// ============================================================================
// IPC Types
// ============================================================================

/// Parameters for the start command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartParams {
    /// Countdown minutes to arm before starting (idle only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    /// Countdown seconds to arm before starting (idle only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
}

impl StartParams {
    /// Returns the requested duration in seconds, if any was given.
    pub fn duration_secs(&self) -> Option<u64> {
        if self.minutes.is_none() && self.seconds.is_none() {
            return None;
        }
        let minutes = u64::from(self.minutes.unwrap_or(0));
        let seconds = u64::from(self.seconds.unwrap_or(0));
        Some(minutes * 60 + seconds)
    }
}

/// Parameters for the config command. All fields optional; only the
/// provided ones are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigParams {
    /// Enable or disable start/completion sounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<bool>,
    /// Enable or disable the per-second tick sound
    #[serde(rename = "tickSound", skip_serializing_if = "Option::is_none")]
    pub tick_sound: Option<bool>,
    /// Default countdown duration in seconds
    #[serde(rename = "defaultSecs", skip_serializing_if = "Option::is_none")]
    pub default_secs: Option<u64>,
    /// Snooze duration in seconds
    #[serde(rename = "snoozeSecs", skip_serializing_if = "Option::is_none")]
    pub snooze_secs: Option<u64>,
}

impl ConfigParams {
    /// Returns true if no field was provided (read-only query).
    pub fn is_empty(&self) -> bool {
        self.sound.is_none()
            && self.tick_sound.is_none()
            && self.default_secs.is_none()
            && self.snooze_secs.is_none()
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum IpcRequest {
    /// Start (or resume) the countdown
    Start {
        /// Start parameters
        #[serde(flatten)]
        params: StartParams,
    },
    /// Pause the running countdown
    Pause,
    /// Reset to idle, abandoning any session in progress
    Reset,
    /// Re-arm a completed countdown with the snooze duration and start it
    Snooze,
    /// Acknowledge a completed countdown and return to idle
    Dismiss,
    /// Set the countdown duration (idle only)
    Set {
        /// Minutes component
        minutes: u32,
        /// Seconds component
        seconds: u32,
    },
    /// Arm one of the preset durations (idle only)
    Preset {
        /// Preset duration in seconds
        seconds: u64,
    },
    /// Read or update settings
    Config {
        /// Settings fields to apply
        #[serde(flatten)]
        params: ConfigParams,
    },
    /// Query the current countdown state
    Status,
    /// Query the session history and statistics
    History,
    /// Erase the session history
    ClearHistory,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u64>,
    /// Armed total duration in seconds
    #[serde(rename = "totalSeconds", skip_serializing_if = "Option::is_none")]
    pub total_seconds: Option<u64>,
    /// Fraction of the countdown elapsed, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Session history records, most recent first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<SessionRecord>>,
    /// Aggregate history statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<HistoryStats>,
    /// Current settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<TimerSettings>,
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
