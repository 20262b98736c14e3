//! OKTimer Library
//!
//! This library provides the core functionality for the OKTimer CLI.
//! It includes:
//! - Countdown engine driven by wall-clock time (pause/resume/snooze)
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Deferred alarm facility for exact completion wake-ups
//! - Desktop notification alerts for countdown completion
//! - Sound cue playback (start/completion/tick)
//! - Settings and session-history persistence

pub mod alarm;
pub mod alert;
pub mod cli;
pub mod daemon;
pub mod sound;
pub mod storage;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ConfigParams, HistoryStats, IpcRequest, IpcResponse, ResponseData, SessionRecord, StartParams,
    TimerSettings, TimerState,
};

// Re-export engine types
pub use daemon::clock::{Clock, ManualClock, SystemClock};
pub use daemon::timer::{CountdownEngine, CountdownSnapshot, TimerEvent};

// Re-export collaborator seams and their doubles
pub use alarm::{AlarmScheduler, MockAlarmScheduler, TokioAlarmScheduler};
pub use alert::{AlertError, CompletionPresenter, DesktopPresenter, MockCompletionPresenter};
pub use sound::{
    create_player, MockSoundPlayer, NullSoundPlayer, RodioSoundPlayer, SoundCue, SoundError,
    SoundPlayer,
};
pub use storage::{
    default_data_dir, MockSessionSink, SessionHistoryStore, SessionSink, SettingsStore,
    StorageError, MAX_SESSIONS,
};
