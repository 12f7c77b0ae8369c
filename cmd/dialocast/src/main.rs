//! dialocast - Turns a two-speaker dialogue script into a conversation audio file.
//!
//! The pipeline: extract the two speaker names from the script, ask the text
//! model to cast a voice for each, then stream multi-speaker synthesis and
//! package the returned PCM as WAV.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod assemble;
mod casting;
mod script;
mod util;

use dialocast_genai::{Client, SpeakerVoice, SpeechRequest, VoiceCatalog, MODEL_TTS};
use util::{format_bytes, print_info, print_success};

/// Environment variable holding the Gemini API key.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Generate a conversation audio file from a dialogue script.
///
/// The script is plain text with one statement per line, `Name: utterance`.
/// The first two distinct names become the conversation's speakers; a text
/// model picks a voice for each before synthesis starts.
#[derive(Parser)]
#[command(name = "dialocast")]
#[command(about = "Generate conversation audio from a two-speaker dialogue script")]
#[command(version)]
struct Cli {
    /// Path to the dialogue script file
    script: PathBuf,

    /// Output filename without extension (default: derived from speaker names)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    // Fatal preconditions, checked before any network call.
    let text = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("cannot read script file {}", cli.script.display()))?;
    let api_key = std::env::var(API_KEY_ENV)
        .with_context(|| format!("{API_KEY_ENV} environment variable is not set"))?;

    let (found1, found2) = script::extract_speakers(&text);
    let out_base = match &cli.output {
        Some(name) => PathBuf::from(name),
        None => PathBuf::from(script::output_basename(
            found1.as_deref(),
            found2.as_deref(),
            &cli.script,
        )),
    };

    // The synthesis API takes exactly two speakers; pad with synthetic names.
    let speaker1 = found1.unwrap_or_else(|| "Speaker 1".to_string());
    let speaker2 = found2.unwrap_or_else(|| "Speaker 2".to_string());
    print_info(&format!("Detected speakers: {speaker1} and {speaker2}"));

    let client = Client::new(api_key)?;
    let catalog = VoiceCatalog::prebuilt();

    let (voice1, voice2) =
        casting::assign_voices(&client, &catalog, &speaker1, &speaker2, &text).await?;
    print_info(&format!("Selected voices: {speaker1}: {}, {speaker2}: {}", voice1.name, voice2.name));

    let request = SpeechRequest {
        model: MODEL_TTS.to_string(),
        prompt: casting::reading_prompt(&speaker1, &voice1, &speaker2, &voice2, &text),
        speakers: [
            SpeakerVoice {
                speaker: speaker1,
                voice: voice1.name,
            },
            SpeakerVoice {
                speaker: speaker2,
                voice: voice2.name,
            },
        ],
    };

    print_info("Generating conversation audio...");
    let speech = client.speech();
    let stream = speech.synthesize_stream(&request).await?;

    match assemble::write_audio(stream, &out_base, |diagnostic| println!("{diagnostic}")).await? {
        Some(path) => {
            let size = std::fs::metadata(&path).map(|m| m.len() as usize).unwrap_or(0);
            print_success(&format!("File saved to: {} ({})", path.display(), format_bytes(size)));
        }
        None => print_info("The service returned no audio."),
    }

    Ok(())
}
