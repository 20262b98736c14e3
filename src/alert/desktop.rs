//! Desktop notification presenter.
//!
//! Posts a completion alert through the platform notification center using
//! `notify-rust`. Desktop notifications auto-expire on every platform, so
//! `dismiss` only clears the local visibility flag; there is no reliable
//! cross-platform close API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use notify_rust::Notification;
use tracing::{debug, warn};

use super::error::AlertError;
use super::CompletionPresenter;

/// Application name shown by the notification center.
const APP_NAME: &str = "oktimer";

/// Presenter that posts completion alerts as desktop notifications.
#[derive(Debug, Default)]
pub struct DesktopPresenter {
    visible: AtomicBool,
}

impl DesktopPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: AtomicBool::new(false),
        }
    }

    /// Posts the notification. Separated from the trait method so the error
    /// is available to log.
    fn show(&self, total: Duration) -> Result<(), AlertError> {
        Notification::new()
            .appname(APP_NAME)
            .summary("タイマー終了")
            .body(&format!(
                "{}のカウントダウンが終了しました",
                format_duration_ja(total)
            ))
            .show()
            .map_err(|e| AlertError::ShowFailed(e.to_string()))?;
        Ok(())
    }
}

impl CompletionPresenter for DesktopPresenter {
    fn present(&self, total: Duration) {
        match self.show(total) {
            Ok(()) => {
                self.visible.store(true, Ordering::SeqCst);
                debug!("Completion notification posted");
            }
            Err(e) => {
                // Fire-and-forget: the countdown itself already completed
                warn!("通知の表示に失敗しました: {}", e);
            }
        }
    }

    fn dismiss(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            debug!("Completion notification dismissed");
        }
    }

    fn is_presenting(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// Formats a duration as "5分" / "1分30秒" / "45秒".
fn format_duration_ja(duration: Duration) -> String {
    let total = duration.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;
    match (minutes, seconds) {
        (0, s) => format!("{}秒", s),
        (m, 0) => format!("{}分", m),
        (m, s) => format!("{}分{}秒", m, s),
    }
}
