//! Completion alert surface.
//!
//! When the countdown reaches zero the engine asks a presenter to surface the
//! completion to the user; when the user resets or dismisses, the engine asks
//! it to take the alert down again. The production implementation posts a
//! desktop notification via `notify-rust`; tests use the mock.
//!
//! Presenting is fire-and-forget from the engine's point of view: a failed
//! notification is logged and swallowed, never surfaced as an engine error.

mod desktop;
mod error;

use std::time::Duration;

pub use desktop::DesktopPresenter;
pub use error::AlertError;

// ============================================================================
// CompletionPresenter
// ============================================================================

/// Surface that shows and hides the countdown-complete alert.
pub trait CompletionPresenter: Send + Sync {
    /// Shows the completion alert for a countdown of the given duration.
    fn present(&self, total: Duration);

    /// Takes down any visible completion alert.
    fn dismiss(&self);

    /// Returns true if an alert is currently showing.
    fn is_presenting(&self) -> bool;
}

// ============================================================================
// MockCompletionPresenter
// ============================================================================

/// Mock presenter for testing: records present/dismiss calls.
#[derive(Debug, Default)]
pub struct MockCompletionPresenter {
    presented: std::sync::Mutex<Vec<Duration>>,
    visible: std::sync::atomic::AtomicBool,
    dismiss_count: std::sync::atomic::AtomicUsize,
}

impl MockCompletionPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the durations passed to `present`, in call order.
    #[must_use]
    pub fn presented_durations(&self) -> Vec<Duration> {
        self.presented.lock().unwrap().clone()
    }

    /// Returns how many times `present` was called.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.presented.lock().unwrap().len()
    }

    /// Returns how many times `dismiss` was called.
    #[must_use]
    pub fn dismiss_count(&self) -> usize {
        self.dismiss_count.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl CompletionPresenter for MockCompletionPresenter {
    fn present(&self, total: Duration) {
        self.presented.lock().unwrap().push(total);
        self.visible.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    fn dismiss(&self) {
        self.dismiss_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.visible
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn is_presenting(&self) -> bool {
        self.visible.load(std::sync::atomic::Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_present_records_duration() {
        let mock = MockCompletionPresenter::new();
        assert!(!mock.is_presenting());

        mock.present(Duration::from_secs(300));

        assert!(mock.is_presenting());
        assert_eq!(mock.present_count(), 1);
        assert_eq!(mock.presented_durations(), vec![Duration::from_secs(300)]);
    }

    #[test]
    fn test_mock_dismiss_clears_visible() {
        let mock = MockCompletionPresenter::new();
        mock.present(Duration::from_secs(60));
        mock.dismiss();

        assert!(!mock.is_presenting());
        assert_eq!(mock.dismiss_count(), 1);
    }

    #[test]
    fn test_mock_dismiss_without_present() {
        let mock = MockCompletionPresenter::new();
        mock.dismiss();

        assert_eq!(mock.present_count(), 0);
        assert_eq!(mock.dismiss_count(), 1);
    }
}
