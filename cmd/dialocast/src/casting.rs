//! Voice casting for the two speakers.
//!
//! Casting asks the text model to suggest one voice per speaker, parses its
//! line-oriented reply against the catalog, and falls back deterministically
//! when a suggestion is missing or names an unknown voice. Transport errors
//! from the suggestion call are not covered by the fallback; they propagate.

use async_trait::async_trait;

use dialocast_genai::{
    Client, Content, Error, Gender, GenerateRequest, Result, Voice, VoiceCatalog, MODEL_TEXT,
};

/// Seam for the voice-suggestion collaborator.
#[async_trait]
pub trait SuggestVoices {
    /// Sends one prompt and returns the model's free-form text reply.
    async fn suggest(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl SuggestVoices for Client {
    async fn suggest(&self, prompt: &str) -> Result<String> {
        let response = self
            .text()
            .generate(&GenerateRequest {
                model: MODEL_TEXT.to_string(),
                contents: vec![Content::user(prompt)],
            })
            .await?;

        Ok(response.first_text().unwrap_or_default().trim().to_string())
    }
}

/// Assigns one catalog voice to each speaker.
///
/// The two returned voices are distinct whenever the catalog allows it; a
/// single-entry catalog yields the same voice twice. The result is a pure
/// function of (speaker1, speaker2, catalog) once the suggestion reply is
/// fixed.
pub async fn assign_voices<S>(
    suggester: &S,
    catalog: &VoiceCatalog,
    speaker1: &str,
    speaker2: &str,
    script: &str,
) -> Result<(Voice, Voice)>
where
    S: SuggestVoices + ?Sized,
{
    if catalog.is_empty() {
        return Err(Error::Config("voice catalog is empty".to_string()));
    }

    let prompt = build_prompt(speaker1, speaker2, script, catalog);
    let reply = suggester.suggest(&prompt).await?;

    let (suggested1, suggested2) = parse_suggestions(&reply, speaker1, speaker2, catalog);

    let voice1 = suggested1.unwrap_or_else(|| fallback_first(catalog));
    let voice2 = suggested2.unwrap_or_else(|| fallback_second(catalog, &voice1));

    Ok((voice1, voice2))
}

/// Builds the suggestion prompt: both speaker names, the catalog split by
/// gender, the script, and the exact reply format expected back.
pub fn build_prompt(speaker1: &str, speaker2: &str, script: &str, catalog: &VoiceCatalog) -> String {
    let male_voices: Vec<&str> = catalog
        .of_gender(Gender::Male)
        .map(|v| v.name.as_str())
        .collect();
    let female_voices: Vec<&str> = catalog
        .of_gender(Gender::Female)
        .map(|v| v.name.as_str())
        .collect();

    format!(
        "Analyze this script with two speakers named '{speaker1}' and '{speaker2}'.\n\
         Suggest the best voice for each of these two speakers based on their character in the script.\n\
         \n\
         Available male voices: {male_voices:?}\n\
         Available female voices: {female_voices:?}\n\
         \n\
         Script:\n\
         {script}\n\
         \n\
         Respond in this exact format:\n\
         {speaker1}: [voice_name]\n\
         {speaker2}: [voice_name]\n\
         \n\
         Choose voices that sound different from each other and match the personality of each speaker.\n\
         Select male and female voices according to the script and context; if the script does not \
         distinctly indicate genders, pick one male and one female voice."
    )
}

/// Parses the suggestion reply into per-speaker voices.
///
/// Each line is tokenized as `SpeakerName: VoiceName` with a case-insensitive
/// speaker prefix; the voice token is resolved against the catalog
/// case-insensitively, yielding the canonical entry. Lines that do not
/// tokenize, or tokens naming no catalog voice, are dropped.
pub fn parse_suggestions(
    reply: &str,
    speaker1: &str,
    speaker2: &str,
    catalog: &VoiceCatalog,
) -> (Option<Voice>, Option<Voice>) {
    let mut voice1 = None;
    let mut voice2 = None;

    for line in reply.lines() {
        if let Some(token) = speaker_suggestion(line, speaker1) {
            if let Some(voice) = catalog.find(token) {
                voice1 = Some(voice.clone());
            }
        } else if let Some(token) = speaker_suggestion(line, speaker2) {
            if let Some(voice) = catalog.find(token) {
                voice2 = Some(voice.clone());
            }
        }
    }

    (voice1, voice2)
}

/// Tokenizes one reply line against a speaker name, returning the raw voice
/// token after `SpeakerName:`.
fn speaker_suggestion<'a>(line: &'a str, speaker: &str) -> Option<&'a str> {
    let line = line.trim();
    let (name, rest) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case(speaker) {
        return None;
    }
    Some(rest.trim())
}

/// Fallback for speaker 1: the first male entry, or the first entry of a
/// catalog with no male voices.
fn fallback_first(catalog: &VoiceCatalog) -> Voice {
    catalog
        .first_of_gender(Gender::Male)
        .or_else(|| catalog.iter().next())
        .cloned()
        .expect("catalog checked non-empty")
}

/// Fallback for speaker 2: the first entry of the opposite gender to voice 1,
/// then the first male entry, then the first entry different from voice 1.
/// A single-entry catalog yields voice 1 again.
fn fallback_second(catalog: &VoiceCatalog, voice1: &Voice) -> Voice {
    if let Some(v) = catalog.first_of_gender(voice1.gender.opposite()) {
        return v.clone();
    }
    if let Some(v) = catalog.first_of_gender(Gender::Male) {
        if v.name != voice1.name {
            return v.clone();
        }
    }
    catalog
        .iter()
        .find(|v| v.name != voice1.name)
        .cloned()
        .unwrap_or_else(|| voice1.clone())
}

/// Builds the reading prompt sent to the speech model: voice instructions
/// followed by the script itself.
pub fn reading_prompt(
    speaker1: &str,
    voice1: &Voice,
    speaker2: &str,
    voice2: &Voice,
    script: &str,
) -> String {
    format!(
        "Please read this script as a conversation using these two distinct voices:\n\
         - Use voice {} for {}\n\
         - Use voice {} for {}\n\
         \n\
         Apply consistent voices throughout the script, using the correct voice for each speaker.\n\
         \n\
         ===SCRIPT===\n\
         {}",
        voice1.name, speaker1, voice2.name, speaker2, script
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSuggester(String);

    #[async_trait]
    impl SuggestVoices for StubSuggester {
        async fn suggest(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingSuggester;

    #[async_trait]
    impl SuggestVoices for FailingSuggester {
        async fn suggest(&self, _prompt: &str) -> Result<String> {
            Err(Error::api(503, "UNAVAILABLE", "service unreachable", 503))
        }
    }

    fn catalog() -> VoiceCatalog {
        VoiceCatalog::prebuilt()
    }

    #[tokio::test]
    async fn test_well_formed_reply_taken_verbatim() {
        let stub = StubSuggester("Alice: Leda\nBob: Charon".to_string());
        let (v1, v2) = assign_voices(&stub, &catalog(), "Alice", "Bob", "Alice: hi")
            .await
            .unwrap();
        assert_eq!(v1.name, "Leda");
        assert_eq!(v2.name, "Charon");
    }

    #[tokio::test]
    async fn test_reply_normalized_to_canonical_capitalization() {
        let stub = StubSuggester("ALICE:  kore \nbob: PUCK".to_string());
        let (v1, v2) = assign_voices(&stub, &catalog(), "Alice", "Bob", "")
            .await
            .unwrap();
        assert_eq!(v1.name, "Kore");
        assert_eq!(v2.name, "Puck");
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back_distinct_and_deterministic() {
        let stub = StubSuggester(String::new());
        let first = assign_voices(&stub, &catalog(), "Alice", "Bob", "")
            .await
            .unwrap();
        let second = assign_voices(&stub, &catalog(), "Alice", "Bob", "")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_ne!(first.0.name, first.1.name);
        // First male entry, then first of the opposite gender.
        assert_eq!(first.0.name, "Puck");
        assert_eq!(first.1.name, "Zephyr");
    }

    #[tokio::test]
    async fn test_unknown_voice_name_falls_back_per_speaker() {
        let stub = StubSuggester("Alice: Nonexistent\nBob: Sulafat".to_string());
        let (v1, v2) = assign_voices(&stub, &catalog(), "Alice", "Bob", "")
            .await
            .unwrap();
        assert_eq!(v1.name, "Puck");
        assert_eq!(v2.name, "Sulafat");
    }

    #[tokio::test]
    async fn test_single_entry_catalog_degenerates_to_same_voice() {
        let only = VoiceCatalog::new(vec![Voice::new("Solo", "Even", Gender::Male)]);
        let stub = StubSuggester(String::new());
        let (v1, v2) = assign_voices(&stub, &only, "Alice", "Bob", "").await.unwrap();
        assert_eq!(v1.name, "Solo");
        assert_eq!(v2.name, "Solo");
    }

    #[tokio::test]
    async fn test_single_gender_catalog_stays_distinct() {
        let females = VoiceCatalog::new(vec![
            Voice::new("Ada", "Bright", Gender::Female),
            Voice::new("Bea", "Soft", Gender::Female),
        ]);
        let stub = StubSuggester(String::new());
        let (v1, v2) = assign_voices(&stub, &females, "Alice", "Bob", "").await.unwrap();
        assert_eq!(v1.name, "Ada");
        assert_eq!(v2.name, "Bea");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let result = assign_voices(&FailingSuggester, &catalog(), "Alice", "Bob", "").await;
        assert!(matches!(result, Err(Error::Api { http_status: 503, .. })));
    }

    #[test]
    fn test_prompt_contains_names_script_and_format() {
        let prompt = build_prompt("Alice", "Bob", "Alice: hi\nBob: yo", &catalog());
        assert!(prompt.contains("'Alice' and 'Bob'"));
        assert!(prompt.contains("Alice: hi\nBob: yo"));
        assert!(prompt.contains("Alice: [voice_name]"));
        assert!(prompt.contains("Bob: [voice_name]"));
        assert!(prompt.contains("\"Puck\""));
        assert!(prompt.contains("\"Zephyr\""));
    }

    #[test]
    fn test_parse_ignores_unrelated_lines() {
        let reply = "Here are my picks:\nAlice: Kore\nSomeone: Puck\nBob: Orus\n";
        let (v1, v2) = parse_suggestions(reply, "Alice", "Bob", &catalog());
        assert_eq!(v1.unwrap().name, "Kore");
        assert_eq!(v2.unwrap().name, "Orus");
    }

    #[test]
    fn test_reading_prompt_frames_script() {
        let v1 = Voice::new("Kore", "Firm", Gender::Female);
        let v2 = Voice::new("Puck", "Upbeat", Gender::Male);
        let prompt = reading_prompt("Alice", &v1, "Bob", &v2, "Alice: hi");
        assert!(prompt.contains("Use voice Kore for Alice"));
        assert!(prompt.contains("Use voice Puck for Bob"));
        assert!(prompt.ends_with("===SCRIPT===\nAlice: hi"));
    }
}
