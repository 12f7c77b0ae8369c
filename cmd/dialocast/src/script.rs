//! Dialogue script parsing.
//!
//! A script is plain UTF-8 text, one statement per line, each line optionally
//! of the form `Name: utterance`.

use std::path::Path;

/// Extracts the first two distinct speaker names from a dialogue script.
///
/// Lines without a colon are skipped. The name is the trimmed text before
/// the first colon; empty names are ignored. Scanning stops as soon as two
/// distinct names have been seen.
pub fn extract_speakers(text: &str) -> (Option<String>, Option<String>) {
    let mut seen: Vec<String> = Vec::new();

    for line in text.lines() {
        let Some((name, _)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || seen.iter().any(|s| s == name) {
            continue;
        }
        seen.push(name.to_string());
        if seen.len() == 2 {
            break;
        }
    }

    let mut iter = seen.into_iter();
    (iter.next(), iter.next())
}

/// Derives the output basename when no override is given.
///
/// Prefers `{speaker1}_{speaker2}` (lowercased, spaces replaced), falls back
/// to the script file stem, then to "output_audio".
pub fn output_basename(
    speaker1: Option<&str>,
    speaker2: Option<&str>,
    script_path: &Path,
) -> String {
    if let (Some(s1), Some(s2)) = (speaker1, speaker2) {
        return format!("{}_{}", slug(s1), slug(s2));
    }

    script_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("output_audio")
        .to_string()
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extracts_first_two_distinct() {
        let (s1, s2) = extract_speakers("Alice: Hi\nBob: Hello\nAlice: Bye");
        assert_eq!(s1.as_deref(), Some("Alice"));
        assert_eq!(s2.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_later_speakers_ignored() {
        let (s1, s2) = extract_speakers("A: x\nB: y\nC: z\nD: w");
        assert_eq!(s1.as_deref(), Some("A"));
        assert_eq!(s2.as_deref(), Some("B"));
    }

    #[test]
    fn test_single_speaker() {
        let (s1, s2) = extract_speakers("OnlyOne: hi");
        assert_eq!(s1.as_deref(), Some("OnlyOne"));
        assert_eq!(s2, None);
    }

    #[test]
    fn test_no_colons() {
        assert_eq!(extract_speakers("no colons here"), (None, None));
    }

    #[test]
    fn test_whitespace_and_empty_names() {
        let (s1, s2) = extract_speakers("  Alice : hi\n: no name\nBob:yo");
        assert_eq!(s1.as_deref(), Some("Alice"));
        assert_eq!(s2.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_basename_from_speakers() {
        let name = output_basename(Some("Dr Smith"), Some("Bob"), &PathBuf::from("scene.txt"));
        assert_eq!(name, "dr_smith_bob");
    }

    #[test]
    fn test_basename_falls_back_to_stem() {
        let name = output_basename(Some("Alice"), None, &PathBuf::from("scripts/scene.txt"));
        assert_eq!(name, "scene");
        let name = output_basename(None, None, &PathBuf::from(""));
        assert_eq!(name, "output_audio");
    }
}
