//! Deferred alarm facility.
//!
//! The countdown engine arms an alarm for the absolute instant the countdown
//! reaches zero. When the alarm fires it wakes the daemon loop, which
//! re-evaluates the countdown against the wall clock, so completion is
//! signalled promptly even when the periodic ticker was delayed or coalesced
//! under system pressure.
//!
//! Cancellation is synchronous: once `cancel` returns, the pending alarm can
//! no longer fire. This matters when the user pauses or resets just before
//! the end instant; a stale alarm firing afterwards would wake the loop for
//! nothing (the engine's state guard makes it harmless, the cancel makes it
//! silent).

use std::sync::Mutex;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

// ============================================================================
// AlarmScheduler
// ============================================================================

/// Schedules a single wake-up at an absolute instant.
///
/// At most one alarm is pending at a time; arming replaces any pending alarm.
pub trait AlarmScheduler: Send + Sync {
    /// Arms the alarm to fire at `fire_at`, replacing any pending alarm.
    fn arm(&self, fire_at: Instant);

    /// Cancels the pending alarm, if any. Synchronous: after this returns
    /// the alarm will not fire.
    fn cancel(&self);

    /// Returns true if an alarm is currently pending.
    fn is_armed(&self) -> bool;
}

// ============================================================================
// TokioAlarmScheduler
// ============================================================================

/// Alarm backed by a spawned tokio sleep task.
///
/// On fire, a unit message is sent on the wake-up channel; the daemon loop
/// owns the receiving end. Must be used from within a tokio runtime.
pub struct TokioAlarmScheduler {
    wakeup_tx: mpsc::UnboundedSender<()>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl TokioAlarmScheduler {
    /// Creates a scheduler that signals the given wake-up channel.
    pub fn new(wakeup_tx: mpsc::UnboundedSender<()>) -> Self {
        Self {
            wakeup_tx,
            pending: Mutex::new(None),
        }
    }

    /// Creates a scheduler together with its wake-up receiver.
    pub fn with_channel() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl AlarmScheduler for TokioAlarmScheduler {
    fn arm(&self, fire_at: Instant) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let tx = self.wakeup_tx.clone();
        let deadline = tokio::time::Instant::from_std(fire_at);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            debug!("Alarm fired");
            let _ = tx.send(());
        });

        *pending = Some(handle);
        debug!("Alarm armed");
    }

    fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(handle) = pending.take() {
            // abort() takes effect before the task can send another message
            handle.abort();
            debug!("Alarm cancelled");
        }
    }

    fn is_armed(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for TokioAlarmScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TokioAlarmScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioAlarmScheduler")
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// MockAlarmScheduler
// ============================================================================

/// Mock alarm for testing: records arm/cancel calls, never fires.
#[derive(Debug, Default)]
pub struct MockAlarmScheduler {
    armed_at: Mutex<Vec<Instant>>,
    armed: std::sync::atomic::AtomicBool,
    cancel_count: std::sync::atomic::AtomicUsize,
}

impl MockAlarmScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every instant the alarm was armed for, in call order.
    #[must_use]
    pub fn armed_instants(&self) -> Vec<Instant> {
        self.armed_at.lock().unwrap().clone()
    }

    /// Returns how many times the alarm was armed.
    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.armed_at.lock().unwrap().len()
    }

    /// Returns how many times `cancel` was called.
    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.cancel_count.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl AlarmScheduler for MockAlarmScheduler {
    fn arm(&self, fire_at: Instant) {
        self.armed_at.lock().unwrap().push(fire_at);
        self.armed.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    fn cancel(&self) {
        self.cancel_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.armed.store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn is_armed(&self) -> bool {
        self.armed.load(std::sync::atomic::Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================
