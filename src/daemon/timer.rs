//! Countdown engine.
//!
//! This module provides the core countdown state machine:
//! - State transitions (Idle → Running → Paused/Completed)
//! - Wall-clock-derived remaining time, immune to tick jitter
//! - Session recording on completion and abandonment
//! - Collaborator side effects (alarm, sound, completion alert)
//!
//! The engine is deliberately infallible: operations that are invalid in the
//! current state are no-ops returning `false`, because the surfaces driving
//! the engine are expected to disable the corresponding controls. Remaining
//! time is never decremented tick by tick; every tick recomputes it from the
//! armed end instant, so a suspended process catches up correctly on the
//! first tick after resumption.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::debug;

use crate::alarm::AlarmScheduler;
use crate::alert::CompletionPresenter;
use crate::daemon::clock::Clock;
use crate::sound::{SoundCue, SoundPlayer};
use crate::storage::SessionSink;
use crate::types::{TimerSettings, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for observers (logging, UI redraw, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Remaining time at the moment of starting
        remaining: Duration,
        /// Armed total duration
        total: Duration,
    },
    /// Countdown paused
    Paused {
        /// Snapshotted remaining time
        remaining: Duration,
    },
    /// Countdown reset to idle
    Reset,
    /// A tick re-evaluated the countdown
    Ticked {
        /// Recomputed remaining time
        remaining: Duration,
    },
    /// Countdown reached zero
    Completed {
        /// Armed total duration of the finished session
        total: Duration,
    },
    /// Completed countdown re-armed with the snooze duration
    Snoozed {
        /// The snooze duration
        duration: Duration,
    },
    /// Completed countdown acknowledged
    Dismissed,
    /// Armed duration changed while idle
    DurationSet {
        /// The new duration
        total: Duration,
    },
}

// ============================================================================
// CountdownSnapshot
// ============================================================================

/// Read-only view of the countdown for status queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountdownSnapshot {
    /// Current state
    pub state: TimerState,
    /// Remaining time (live-computed while running)
    pub remaining: Duration,
    /// Armed total duration
    pub total: Duration,
    /// Fraction elapsed, in [0, 1] (0 for a zero-length countdown)
    pub progress: f64,
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Countdown state machine driven by wall-clock time.
///
/// All collaborators are injected at construction so tests can substitute
/// doubles. The engine itself holds no timers; the daemon loop feeds it
/// ticks and it recomputes state from the injected clock.
pub struct CountdownEngine {
    clock: Arc<dyn Clock>,
    alarm: Arc<dyn AlarmScheduler>,
    presenter: Arc<dyn CompletionPresenter>,
    sounds: Arc<dyn SoundPlayer>,
    sessions: Arc<dyn SessionSink>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,

    settings: TimerSettings,
    state: TimerState,
    /// Duration the countdown was armed with
    total: Duration,
    /// Authoritative only while Idle/Paused; derived from `end_at` otherwise
    remaining: Duration,
    /// Some iff state == Running
    end_at: Option<Instant>,
    /// Whole seconds remaining at the last tick, for the tick cue
    last_tick_secs: u64,
}

impl CountdownEngine {
    /// Creates an engine in the idle state, armed with the default duration
    /// from the settings.
    pub fn new(
        settings: TimerSettings,
        clock: Arc<dyn Clock>,
        alarm: Arc<dyn AlarmScheduler>,
        presenter: Arc<dyn CompletionPresenter>,
        sounds: Arc<dyn SoundPlayer>,
        sessions: Arc<dyn SessionSink>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let initial = Duration::from_secs(settings.default_duration_secs);
        Self {
            clock,
            alarm,
            presenter,
            sounds,
            sessions,
            event_tx,
            settings,
            state: TimerState::Idle,
            total: initial,
            remaining: initial,
            end_at: None,
            last_tick_secs: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------------

    /// Starts the countdown from idle, or resumes it from paused.
    ///
    /// Returns false (no-op) in any other state.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                if self.state == TimerState::Idle {
                    self.total = self.remaining;
                }

                let end = self.clock.now() + self.remaining;
                self.end_at = Some(end);
                self.state = TimerState::Running;
                self.last_tick_secs = self.remaining.as_secs();

                self.alarm.arm(end);
                self.play_cue(SoundCue::Started, self.settings.sound_enabled);
                self.emit(TimerEvent::Started {
                    remaining: self.remaining,
                    total: self.total,
                });
                debug!("Countdown started: {}s remaining", self.remaining.as_secs());
                true
            }
            _ => false,
        }
    }

    /// Pauses the running countdown, snapshotting the remaining time.
    ///
    /// Returns false (no-op) unless running. The pending alarm is cancelled
    /// before this returns.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        let now = self.clock.now();
        self.remaining = self
            .end_at
            .map(|end| end.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
            .min(self.total);
        self.end_at = None;
        self.state = TimerState::Paused;

        self.alarm.cancel();
        self.emit(TimerEvent::Paused {
            remaining: self.remaining,
        });
        debug!("Countdown paused: {}s remaining", self.remaining.as_secs());
        true
    }

    /// Resets to idle from any state.
    ///
    /// A session in progress (running or paused) is recorded as abandoned.
    /// The pending alarm is cancelled and any visible completion alert is
    /// taken down before this returns.
    pub fn reset(&mut self) -> bool {
        if self.state.session_in_progress() {
            self.sessions.record(self.total, false);
        }

        self.remaining = self.total;
        self.end_at = None;
        self.state = TimerState::Idle;

        self.alarm.cancel();
        self.presenter.dismiss();
        self.emit(TimerEvent::Reset);
        true
    }

    /// Acknowledges a completed countdown and returns to idle.
    ///
    /// Returns false (no-op) unless completed.
    pub fn dismiss(&mut self) -> bool {
        if self.state != TimerState::Completed {
            return false;
        }

        self.remaining = self.total;
        self.state = TimerState::Idle;

        self.presenter.dismiss();
        self.emit(TimerEvent::Dismissed);
        true
    }

    /// Re-arms a completed countdown with the snooze duration and starts it
    /// immediately.
    ///
    /// Returns false (no-op) unless completed.
    pub fn snooze(&mut self) -> bool {
        if self.state != TimerState::Completed {
            return false;
        }

        let duration = Duration::from_secs(self.settings.snooze_secs);
        self.presenter.dismiss();
        self.total = duration;
        self.remaining = duration;
        self.state = TimerState::Idle;
        self.emit(TimerEvent::Snoozed { duration });

        self.start()
    }

    /// Sets the countdown duration from minutes and seconds.
    ///
    /// Returns false (no-op) unless idle.
    pub fn set_duration(&mut self, minutes: u32, seconds: u32) -> bool {
        let secs = u64::from(minutes) * 60 + u64::from(seconds);
        self.set_preset(secs)
    }

    /// Arms the countdown with the given number of seconds.
    ///
    /// Returns false (no-op) unless idle.
    pub fn set_preset(&mut self, seconds: u64) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }

        let duration = Duration::from_secs(seconds);
        self.total = duration;
        self.remaining = duration;
        self.emit(TimerEvent::DurationSet { total: duration });
        true
    }

    /// Replaces the settings (cue gates, snooze/default durations).
    ///
    /// Does not touch the currently armed duration; the new default applies
    /// on the next reset-to-default path.
    pub fn update_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    // ------------------------------------------------------------------------
    // Tick handling
    // ------------------------------------------------------------------------

    /// Re-evaluates the countdown against the clock.
    ///
    /// Ticks delivered in any state but `Running` are no-ops, which makes a
    /// tick racing the completion transition harmless. Returns true exactly
    /// once per session: on the tick that observes completion.
    pub fn handle_tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        let Some(end) = self.end_at else {
            return false;
        };

        let now = self.clock.now();
        if now >= end {
            self.complete();
            return true;
        }

        self.remaining = end.saturating_duration_since(now).min(self.total);

        let secs = self.remaining.as_secs();
        if secs != self.last_tick_secs {
            self.last_tick_secs = secs;
            self.play_cue(SoundCue::Tick, self.settings.tick_sound_enabled);
        }

        self.emit(TimerEvent::Ticked {
            remaining: self.remaining,
        });
        false
    }

    /// Transition to completed. Called from exactly one place, under the
    /// `Running` guard.
    fn complete(&mut self) {
        self.remaining = Duration::ZERO;
        self.end_at = None;
        self.state = TimerState::Completed;

        self.alarm.cancel();
        self.sessions.record(self.total, true);
        self.play_cue(SoundCue::Completed, self.settings.sound_enabled);
        self.presenter.present(self.total);
        self.emit(TimerEvent::Completed { total: self.total });
        debug!("Countdown completed: {}s", self.total.as_secs());
    }

    // ------------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------------

    /// Returns a read-only snapshot of the countdown.
    ///
    /// While running, remaining time is recomputed from the clock at the
    /// moment of the call rather than echoing the last tick.
    pub fn snapshot(&self) -> CountdownSnapshot {
        let remaining = match (self.state, self.end_at) {
            (TimerState::Running, Some(end)) => end
                .saturating_duration_since(self.clock.now())
                .min(self.total),
            _ => self.remaining,
        };

        CountdownSnapshot {
            state: self.state,
            remaining,
            total: self.total,
            progress: progress(self.total, remaining),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn play_cue(&self, cue: SoundCue, enabled: bool) {
        if !enabled {
            return;
        }
        if let Err(e) = self.sounds.play_cue(cue) {
            debug!("Cue {} failed: {}", cue.as_str(), e);
        }
    }

    fn emit(&self, event: TimerEvent) {
        // Observers may be gone during shutdown; delivery is best-effort
        let _ = self.event_tx.send(event);
    }
}

impl std::fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("state", &self.state)
            .field("total", &self.total)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Fraction of the countdown elapsed, in [0, 1]. Zero-length countdowns
/// report 0.
fn progress(total: Duration, remaining: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (total - remaining.min(total)).as_secs_f64() / total.as_secs_f64()
}

// ============================================================================
// Tests
// ============================================================================
