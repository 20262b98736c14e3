//! Cue player implementation using rodio.

use std::fs::File;
use std::io::{BufReader, Cursor};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::get_embedded_sound;
use super::error::SoundError;
use super::source::{cue_source, SoundSource};
use super::{SoundCue, SoundPlayer};

/// Cue player backed by a rodio output stream.
///
/// Thread-safe behind `Arc`; playback is detached and never blocks the
/// caller. System sounds that fail to open or decode fall back to the
/// embedded tone.
pub struct RodioSoundPlayer {
    /// Must be kept alive for the duration of playback.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a player on the default audio output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceUnavailable` when no output device exists.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceUnavailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a resolved source, falling back to the embedded tone when a
    /// system sound cannot be played.
    fn play_source(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::System { name, path } => match self.play_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.should_fall_back() => {
                    warn!("システムサウンド '{}' の再生に失敗: {}", name, e);
                    self.play_embedded()
                }
                Err(e) => Err(e),
            },
            SoundSource::Embedded { .. } => self.play_embedded(),
        }
    }

    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::UnreadableSource(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeFailed(e.to_string()))?;

        self.play_decoder(decoder)
    }

    fn play_embedded(&self) -> Result<(), SoundError> {
        let decoder = Decoder::new(Cursor::new(get_embedded_sound()))
            .map_err(|e| SoundError::DecodeFailed(format!("embedded tone: {}", e)))?;

        self.play_decoder(decoder)
    }

    fn play_decoder<R>(&self, decoder: Decoder<R>) -> Result<(), SoundError>
    where
        R: std::io::Read + std::io::Seek + Send + Sync + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::SinkFailed(e.to_string()))?;

        sink.append(decoder);
        sink.detach();

        Ok(())
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_cue(&self, cue: SoundCue) -> Result<(), SoundError> {
        let source = cue_source(cue);
        debug!("Playing cue {} via {}", cue.as_str(), source.name());
        self.play_source(&source)
    }

    fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}
