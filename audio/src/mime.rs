//! Media-type descriptor parsing.
//!
//! Speech-generation APIs tag each binary chunk with a descriptor such as
//! `audio/L16;rate=24000`. The parameters tell us how to wrap the raw PCM
//! payload into a playable container.

/// Decoded audio parameters for a raw PCM payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioParams {
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            bits_per_sample: 16,
            sample_rate: 24000,
        }
    }
}

impl AudioParams {
    /// Parses audio parameters out of a media-type descriptor.
    ///
    /// Segments are `;`-separated, in arbitrary order and casing. A
    /// `rate=<n>` segment sets the sample rate; a segment containing
    /// `audio/L<bits>` sets the bit depth. Segments that fail to parse are
    /// ignored and the defaults (16-bit, 24000 Hz) are kept.
    pub fn from_mime(mime: &str) -> Self {
        let mut params = Self::default();

        for segment in mime.split(';') {
            let segment = segment.trim();
            let lower = segment.to_lowercase();

            if let Some(value) = lower.strip_prefix("rate=") {
                if let Ok(rate) = value.trim().parse::<u32>() {
                    params.sample_rate = rate;
                }
            } else if segment.contains("audio/L") {
                if let Some(value) = segment.split_once('L').map(|(_, v)| v) {
                    if let Ok(bits) = value.trim().parse::<u16>() {
                        params.bits_per_sample = bits;
                    }
                }
            }
        }

        params
    }
}

/// Returns true if the media type already denotes a WAV container.
pub fn is_wav(mime: &str) -> bool {
    mime.split(';')
        .next()
        .map(|t| t.trim().eq_ignore_ascii_case("audio/wav"))
        .unwrap_or(false)
}

/// Guesses the output file extension for a media type.
///
/// Raw PCM types (`audio/L16` etc.) have no registered extension; they are
/// converted to WAV before writing, so "wav" is the fallback.
pub fn extension_for(mime: &str) -> &'static str {
    let subtype = mime
        .split(';')
        .next()
        .and_then(|t| t.trim().split('/').nth(1))
        .unwrap_or("");

    match subtype.to_lowercase().as_str() {
        "wav" | "x-wav" | "wave" => "wav",
        "mpeg" | "mp3" => "mp3",
        "flac" => "flac",
        "ogg" => "ogg",
        _ => "wav",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_and_bits() {
        let params = AudioParams::from_mime("audio/L16;rate=44100");
        assert_eq!(params.bits_per_sample, 16);
        assert_eq!(params.sample_rate, 44100);
    }

    #[test]
    fn test_unrecognized_keeps_defaults() {
        let params = AudioParams::from_mime("audio/something-unrecognized");
        assert_eq!(params, AudioParams::default());
        assert_eq!(params.bits_per_sample, 16);
        assert_eq!(params.sample_rate, 24000);
    }

    #[test]
    fn test_bad_rate_keeps_default_but_bits_parse() {
        let params = AudioParams::from_mime("rate=not-a-number;audio/L24");
        assert_eq!(params.bits_per_sample, 24);
        assert_eq!(params.sample_rate, 24000);
    }

    #[test]
    fn test_segment_order_and_casing() {
        let params = AudioParams::from_mime(" RATE=8000 ; audio/L8 ");
        assert_eq!(params.bits_per_sample, 8);
        assert_eq!(params.sample_rate, 8000);
    }

    #[test]
    fn test_is_wav() {
        assert!(is_wav("audio/wav"));
        assert!(is_wav("Audio/WAV; rate=24000"));
        assert!(!is_wav("audio/L16;rate=24000"));
        assert!(!is_wav(""));
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("audio/wav"), "wav");
        assert_eq!(extension_for("audio/mpeg"), "mp3");
        assert_eq!(extension_for("audio/L16;rate=24000"), "wav");
        assert_eq!(extension_for("garbage"), "wav");
    }
}
