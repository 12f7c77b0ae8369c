//! Streamed response assembly.
//!
//! Drives the speech synthesis chunk stream to completion: text chunks go to
//! the caller's callback, audio chunks are packaged as WAV (unless already
//! WAV) and written to disk. Every audio chunk targets the same destination
//! basename, so when the service produces more than one, the last write wins.

use std::path::{Path, PathBuf};
use std::pin::pin;

use anyhow::Context;
use futures::{Stream, StreamExt};

use dialocast_audio::{mime, wav, AudioParams};
use dialocast_genai::SpeechChunk;

/// Consumes the synthesis stream, writing audio next to `out_base`.
///
/// Returns the path of the file written last, or None when the stream
/// carried no audio.
pub async fn write_audio<S>(
    stream: S,
    out_base: &Path,
    mut on_text: impl FnMut(&str),
) -> anyhow::Result<Option<PathBuf>>
where
    S: Stream<Item = dialocast_genai::Result<SpeechChunk>>,
{
    let mut stream = pin!(stream);
    let mut written = None;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;

        if let Some(text) = &chunk.text {
            on_text(text);
        }

        let Some(audio) = &chunk.audio else {
            continue;
        };

        // Append rather than with_extension: a basename may itself contain
        // dots ("dr._smith_bob") and must not be truncated at the last one.
        let mut file = out_base.as_os_str().to_os_string();
        file.push(".");
        file.push(mime::extension_for(&audio.mime_type));
        let path = PathBuf::from(file);

        if mime::is_wav(&audio.mime_type) {
            std::fs::write(&path, &audio.data)
                .with_context(|| format!("failed to write {}", path.display()))?;
        } else {
            let params = AudioParams::from_mime(&audio.mime_type);
            let bytes = wav::encode(&params, &audio.data)
                .with_context(|| format!("cannot package {}", audio.mime_type))?;
            std::fs::write(&path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        tracing::debug!(path = %path.display(), bytes = audio.data.len(), "wrote audio chunk");
        written = Some(path);
    }

    Ok(written)
}
