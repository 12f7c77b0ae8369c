//! Audio packaging utilities.
//!
//! This crate provides the pieces needed to turn raw PCM payloads from a
//! speech-generation API into playable files:
//!
//! - `mime`: media-type descriptor parsing (`audio/L16;rate=24000` style)
//! - `wav`: canonical RIFF/WAVE container encoding
//!
//! # Example
//!
//! ```rust
//! use dialocast_audio::{mime::AudioParams, wav};
//!
//! let params = AudioParams::from_mime("audio/L16;rate=24000");
//! let pcm = vec![0u8; 480];
//! let wav_bytes = wav::encode(&params, &pcm)?;
//! assert_eq!(wav_bytes.len(), 44 + pcm.len());
//! # Ok::<(), dialocast_audio::Error>(())
//! ```

pub mod mime;
pub mod wav;

pub use mime::AudioParams;

use thiserror::Error;

/// Result type alias for audio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for audio packaging operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Bit depth is not a whole number of bytes.
    #[error("unsupported bit depth: {0} (must be a multiple of 8)")]
    UnsupportedBitDepth(u16),

    /// Sample rate too large for the header's 32-bit byte-rate field.
    #[error("unsupported sample rate: {0}")]
    UnsupportedSampleRate(u32),

    /// Byte sequence is not a valid WAV header.
    #[error("invalid wav header: {0}")]
    InvalidHeader(String),
}
