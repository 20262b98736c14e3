//! Alert surface error types.

use thiserror::Error;

/// Errors that can occur while presenting a completion alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The desktop notification could not be posted.
    #[error("通知の表示に失敗しました: {0}")]
    ShowFailed(String),

    /// No notification backend is available on this system.
    #[error("通知バックエンドが利用できません: {0}")]
    BackendUnavailable(String),
}
