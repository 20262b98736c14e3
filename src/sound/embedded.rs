//! Embedded fallback tone.
//!
//! A tiny WAV clip compiled into the binary, used whenever a system sound
//! cannot be found or decoded. Keeps the daemon audible on minimal systems
//! with no sound theme installed.

/// Short click in WAV format (16-bit PCM, 44.1kHz, mono, 8 samples).
///
/// Layout:
/// - RIFF header (12 bytes)
/// - fmt chunk (24 bytes)
/// - data chunk header (8 bytes)
/// - 16 bytes of sample data
pub const EMBEDDED_SOUND_DATA: &[u8] = &[
    // RIFF header
    0x52, 0x49, 0x46, 0x46, // "RIFF"
    0x34, 0x00, 0x00, 0x00, // File size - 8 (52 bytes)
    0x57, 0x41, 0x56, 0x45, // "WAVE"
    // fmt chunk
    0x66, 0x6D, 0x74, 0x20, // "fmt "
    0x10, 0x00, 0x00, 0x00, // Chunk size (16 bytes)
    0x01, 0x00, // Audio format (1 = PCM)
    0x01, 0x00, // Number of channels (1 = mono)
    0x44, 0xAC, 0x00, 0x00, // Sample rate (44100 Hz)
    0x88, 0x58, 0x01, 0x00, // Byte rate (44100 * 1 * 2 = 88200)
    0x02, 0x00, // Block align (1 * 2 = 2)
    0x10, 0x00, // Bits per sample (16)
    // data chunk
    0x64, 0x61, 0x74, 0x61, // "data"
    0x10, 0x00, 0x00, 0x00, // Data size (16 bytes, 8 samples)
    0x00, 0x20, 0x00, 0x40, // Rising edge
    0x00, 0x60, 0x00, 0x7F, // Peak
    0x00, 0x60, 0x00, 0x40, // Falling edge
    0x00, 0x20, 0x00, 0x00, // Back to silence
];

/// Returns the embedded tone data.
#[must_use]
pub const fn get_embedded_sound() -> &'static [u8] {
    EMBEDDED_SOUND_DATA
}
