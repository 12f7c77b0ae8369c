//! Multi-speaker speech synthesis service.

use std::sync::Arc;

use async_stream::try_stream;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    http::{HttpClient, SseReader},
    types::{
        Candidate, Content, GenerationConfig, MultiSpeakerVoiceConfig, PrebuiltVoiceConfig,
        SpeakerVoiceConfig, SpeechConfig, VoiceConfig,
    },
};

/// Speech synthesis service.
pub struct SpeechService {
    http: Arc<HttpClient>,
}

impl SpeechService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Performs streaming multi-speaker speech synthesis.
    ///
    /// Returns a stream of chunks, each carrying either a text diagnostic or
    /// a decoded audio payload tagged with its media type. The stream is
    /// finite and must be driven to completion; fetching the next chunk is
    /// the only suspension point.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futures::StreamExt;
    /// use dialocast_genai::{Client, SpeechRequest, SpeakerVoice, MODEL_TTS};
    ///
    /// # async fn run() -> dialocast_genai::Result<()> {
    /// let client = Client::new("your-api-key")?;
    /// let speech = client.speech();
    /// let request = SpeechRequest {
    ///     model: MODEL_TTS.to_string(),
    ///     prompt: "Alice: Hi\nBob: Hello".to_string(),
    ///     speakers: [
    ///         SpeakerVoice { speaker: "Alice".to_string(), voice: "Kore".to_string() },
    ///         SpeakerVoice { speaker: "Bob".to_string(), voice: "Puck".to_string() },
    ///     ],
    /// };
    /// let stream = speech.synthesize_stream(&request).await?;
    /// let mut stream = std::pin::pin!(stream);
    ///
    /// while let Some(chunk) = stream.next().await {
    ///     let chunk = chunk?;
    ///     if let Some(audio) = &chunk.audio {
    ///         // audio.data holds raw PCM, audio.mime_type tells its layout
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn synthesize_stream(
        &self,
        request: &SpeechRequest,
    ) -> Result<impl Stream<Item = Result<SpeechChunk>>> {
        let path = format!(
            "/v1beta/models/{}:streamGenerateContent?alt=sse",
            request.model
        );
        let byte_stream = self.http.request_stream(&path, &request.body()).await?;

        let mut reader = SseReader::new(Box::pin(byte_stream));

        Ok(try_stream! {
            loop {
                match reader.read_event().await? {
                    Some(data) => {
                        let resp: StreamChunkResponse = serde_json::from_slice(&data)?;

                        if let Some(err) = resp.error {
                            Err(Error::api(err.code, err.status, err.message, 200))?;
                        }

                        if let Some(chunk) = decode_chunk(resp.candidates)? {
                            yield chunk;
                        }
                    }
                    None => break,
                }
            }
        })
    }
}

/// Converts one wire event into a chunk.
///
/// Events whose first candidate carries no parts are dropped, matching the
/// upstream behavior of skipping keep-alive chunks.
fn decode_chunk(candidates: Vec<Candidate>) -> Result<Option<SpeechChunk>> {
    let Some(part) = candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
    else {
        return Ok(None);
    };

    let audio = match part.inline_data {
        Some(blob) => Some(AudioData {
            data: BASE64.decode(blob.data.as_bytes())?,
            mime_type: blob.mime_type,
        }),
        None => None,
    };

    Ok(Some(SpeechChunk {
        text: part.text,
        audio,
    }))
}

/// Request for multi-speaker speech synthesis.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Model name.
    pub model: String,

    /// Full prompt, including the dialogue script and reading instructions.
    pub prompt: String,

    /// The two speakers and their assigned catalog voice names.
    ///
    /// The API accepts exactly two entries.
    pub speakers: [SpeakerVoice; 2],
}

/// One speaker bound to a catalog voice name.
#[derive(Debug, Clone, Default)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice: String,
}

impl SpeechRequest {
    fn body(&self) -> SpeechBody {
        let speaker_voice_configs = self
            .speakers
            .iter()
            .map(|sv| SpeakerVoiceConfig {
                speaker: sv.speaker.clone(),
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: sv.voice.clone(),
                    },
                },
            })
            .collect();

        SpeechBody {
            contents: vec![Content::user(self.prompt.clone())],
            generation_config: GenerationConfig {
                temperature: Some(1.0),
                response_modalities: Some(vec!["audio".to_string()]),
                speech_config: Some(SpeechConfig {
                    multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                        speaker_voice_configs,
                    }),
                }),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechBody {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

/// A chunk of the streamed synthesis response.
///
/// Carries a text diagnostic, a decoded audio payload, or (never, in
/// practice) both.
#[derive(Debug, Clone, Default)]
pub struct SpeechChunk {
    /// Text diagnostic content.
    pub text: Option<String>,

    /// Decoded audio payload.
    pub audio: Option<AudioData>,
}

/// Decoded audio payload with its media type.
#[derive(Debug, Clone, Default)]
pub struct AudioData {
    /// Raw payload bytes.
    pub data: Vec<u8>,

    /// Media-type descriptor, e.g. `audio/L16;codec=pcm;rate=24000`.
    pub mime_type: String,
}

// ==================== Internal Types ====================

#[derive(Deserialize)]
struct StreamChunkResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Deserialize)]
struct StreamError {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SpeechRequest {
        SpeechRequest {
            model: "tts-model".to_string(),
            prompt: "Alice: Hi\nBob: Hello".to_string(),
            speakers: [
                SpeakerVoice {
                    speaker: "Alice".to_string(),
                    voice: "Kore".to_string(),
                },
                SpeakerVoice {
                    speaker: "Bob".to_string(),
                    voice: "Puck".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_body_has_two_speaker_configs() {
        let json = serde_json::to_value(request().body()).unwrap();
        let configs = json["generationConfig"]["speechConfig"]["multiSpeakerVoiceConfig"]
            ["speakerVoiceConfigs"]
            .as_array()
            .unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0]["speaker"], "Alice");
        assert_eq!(configs[1]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"], "Puck");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "audio");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Alice: Hi\nBob: Hello");
    }

    #[test]
    fn test_decode_chunk_audio() {
        let event = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "audio/L16;rate=24000", "data": "AAEC"}}]
                }
            }]
        }"#;
        let resp: StreamChunkResponse = serde_json::from_str(event).unwrap();
        let chunk = decode_chunk(resp.candidates).unwrap().unwrap();
        let audio = chunk.audio.unwrap();
        assert_eq!(audio.data, vec![0u8, 1, 2]);
        assert_eq!(audio.mime_type, "audio/L16;rate=24000");
        assert!(chunk.text.is_none());
    }

    #[test]
    fn test_decode_chunk_skips_empty_candidates() {
        let resp: StreamChunkResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(decode_chunk(resp.candidates).unwrap().is_none());

        let resp: StreamChunkResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(decode_chunk(resp.candidates).unwrap().is_none());
    }
}
