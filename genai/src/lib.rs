//! Gemini generative-language API SDK.
//!
//! This crate provides a client for the Google Gemini API, covering the two
//! services dialocast needs: plain text generation and multi-speaker speech
//! synthesis with a streamed audio response.

mod client;
mod error;
pub mod http;
mod speech;
mod text;
mod types;
mod voices;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use speech::{AudioData, SpeechChunk, SpeechRequest, SpeechService, SpeakerVoice};
pub use text::{GenerateRequest, GenerateResponse, TextService};
pub use types::{
    Blob, Candidate, Content, GenerationConfig, MultiSpeakerVoiceConfig, Part, PrebuiltVoiceConfig,
    SpeakerVoiceConfig, SpeechConfig, VoiceConfig,
};
pub use voices::{Gender, Voice, VoiceCatalog};

/// Default model for text generation.
pub const MODEL_TEXT: &str = "gemini-2.5-flash";

/// Default model for multi-speaker speech synthesis.
pub const MODEL_TTS: &str = "gemini-2.5-flash-preview-tts";
