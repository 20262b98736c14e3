//! Sound playback for countdown cues.
//!
//! Three cues exist: one when the countdown starts, one when it completes,
//! and an optional once-per-second tick. Each cue maps to a platform system
//! sound when one can be found, with an embedded tone compiled into the
//! binary as fallback, so the daemon makes noise even on systems without the
//! expected sound files.
//!
//! Playback is non-blocking and best-effort: the engine fires a cue and moves
//! on. When no audio device is available the daemon runs with the silent
//! player instead.

mod embedded;
mod error;
mod player;
mod source;

use std::sync::Arc;

use tracing::warn;

pub use embedded::{get_embedded_sound, EMBEDDED_SOUND_DATA};
pub use error::SoundError;
pub use player::RodioSoundPlayer;
pub use source::{cue_source, discover_system_sounds, find_system_sound, SoundSource};

// ============================================================================
// SoundCue
// ============================================================================

/// The audible cues the countdown can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Countdown started or resumed
    Started,
    /// Countdown reached zero
    Completed,
    /// One whole second elapsed while running
    Tick,
}

impl SoundCue {
    /// Returns the cue name used in logs and source lookup.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Started => "started",
            SoundCue::Completed => "completed",
            SoundCue::Tick => "tick",
        }
    }
}

// ============================================================================
// SoundPlayer
// ============================================================================

/// Trait for cue playback implementations.
///
/// Implementations must not block; sounds play in the background.
pub trait SoundPlayer: Send + Sync {
    /// Plays the given cue.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails. Callers treat this as advisory.
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;
}

// ============================================================================
// NullSoundPlayer
// ============================================================================

/// Silent player used when no audio device is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play_cue(&self, _cue: SoundCue) -> Result<(), SoundError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}

// ============================================================================
// MockSoundPlayer
// ============================================================================

/// Mock player for testing: records played cues.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    cues: std::sync::Mutex<Vec<SoundCue>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns every cue played, in call order.
    #[must_use]
    pub fn played_cues(&self) -> Vec<SoundCue> {
        self.cues.lock().unwrap().clone()
    }

    /// Returns how many times the given cue was played.
    #[must_use]
    pub fn count_of(&self, cue: SoundCue) -> usize {
        self.cues.lock().unwrap().iter().filter(|c| **c == cue).count()
    }

    pub fn clear(&self) {
        self.cues.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::SinkFailed("Mock failure".to_string()));
        }
        self.cues.lock().unwrap().push(cue);
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Creates the best available player: rodio when an audio device exists,
/// otherwise the silent fallback (with a warning logged).
#[must_use]
pub fn create_player() -> Arc<dyn SoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Arc::new(player),
        Err(e) => {
            warn!("オーディオが利用できないため、サウンドを無効にします: {}", e);
            Arc::new(NullSoundPlayer)
        }
    }
}
