//! Canonical RIFF/WAVE container encoding.
//!
//! Wraps a raw mono PCM payload in the fixed 44-byte WAV header so standard
//! decoders can play it.

use crate::{mime::AudioParams, Error, Result};

/// Size of the canonical WAV header in bytes.
pub const HEADER_LEN: usize = 44;

const NUM_CHANNELS: u16 = 1;

/// Wraps raw PCM bytes in a canonical WAV container.
///
/// The header is laid out little-endian: RIFF chunk, `fmt ` subchunk
/// (PCM, mono), `data` subchunk, followed by the payload unchanged.
pub fn encode(params: &AudioParams, pcm: &[u8]) -> Result<Vec<u8>> {
    if params.bits_per_sample == 0 || params.bits_per_sample % 8 != 0 {
        return Err(Error::UnsupportedBitDepth(params.bits_per_sample));
    }

    let bytes_per_sample = params.bits_per_sample / 8;
    let block_align = NUM_CHANNELS * bytes_per_sample;
    let byte_rate = params
        .sample_rate
        .checked_mul(block_align as u32)
        .ok_or(Error::UnsupportedSampleRate(params.sample_rate))?;
    let data_size = pcm.len() as u32;
    let chunk_size = 36 + data_size;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&chunk_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt subchunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    out.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    out.extend_from_slice(&params.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&params.bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm);

    Ok(out)
}

/// Decoded WAV header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub chunk_size: u32,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl Header {
    /// Parses the canonical 44-byte header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::InvalidHeader(format!(
                "too short: {} bytes",
                bytes.len()
            )));
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(Error::InvalidHeader("missing RIFF/WAVE magic".to_string()));
        }
        if &bytes[12..16] != b"fmt " || &bytes[36..40] != b"data" {
            return Err(Error::InvalidHeader("missing fmt/data subchunk".to_string()));
        }

        Ok(Self {
            chunk_size: u32_at(bytes, 4),
            num_channels: u16_at(bytes, 22),
            sample_rate: u32_at(bytes, 24),
            byte_rate: u32_at(bytes, 28),
            block_align: u16_at(bytes, 32),
            bits_per_sample: u16_at(bytes, 34),
            data_size: u32_at(bytes, 40),
        })
    }
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
