//! Sound system error types.

use thiserror::Error;

/// Errors that can occur during cue playback.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device is available.
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceUnavailable(String),

    /// The sound file could not be read.
    #[error("サウンドファイルを読み込めません: {0}")]
    UnreadableSource(String),

    /// The audio data could not be decoded.
    #[error("サウンドのデコードに失敗しました: {0}")]
    DecodeFailed(String),

    /// The playback sink could not be created or fed.
    #[error("サウンド再生に失敗しました: {0}")]
    SinkFailed(String),
}

impl SoundError {
    /// Returns true if the error means audio is unusable on this system.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceUnavailable(_))
    }

    /// Returns true if playback should retry with the embedded tone.
    #[must_use]
    pub fn should_fall_back(&self) -> bool {
        matches!(self, Self::UnreadableSource(_) | Self::DecodeFailed(_))
    }
}
