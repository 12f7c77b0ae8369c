//! Prebuilt voice catalog.
//!
//! The speech models select voices by name from a fixed set. The catalog is
//! deployment data: an ordered, immutable table of voice names with their
//! style and gender tags.

use serde::{Deserialize, Serialize};

/// Voice gender tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns the opposite gender.
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

/// One selectable voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Canonical voice name, as the API expects it.
    pub name: String,
    /// Style tag, e.g. "Bright" or "Informative".
    pub style: String,
    /// Gender tag.
    pub gender: Gender,
}

impl Voice {
    /// Creates a voice entry.
    pub fn new(name: impl Into<String>, style: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            style: style.into(),
            gender,
        }
    }
}

/// An ordered, immutable table of voices.
///
/// The catalog is passed in wherever voice resolution happens so tests can
/// substitute smaller tables.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    /// Creates a catalog from an ordered list of voices.
    ///
    /// Entries must be unique by name (case-insensitive).
    pub fn new(voices: Vec<Voice>) -> Self {
        debug_assert!(
            {
                let mut names: Vec<String> =
                    voices.iter().map(|v| v.name.to_lowercase()).collect();
                names.sort();
                names.windows(2).all(|w| w[0] != w[1])
            },
            "catalog entries must be unique by name"
        );
        Self { voices }
    }

    /// Returns the standard prebuilt voice catalog.
    pub fn prebuilt() -> Self {
        let voices = [
            ("Zephyr", "Bright", Gender::Female),
            ("Puck", "Upbeat", Gender::Male),
            ("Charon", "Informative", Gender::Male),
            ("Kore", "Firm", Gender::Female),
            ("Fenrir", "Excitable", Gender::Male),
            ("Leda", "Youthful", Gender::Female),
            ("Orus", "Firm", Gender::Male),
            ("Aoede", "Breezy", Gender::Female),
            ("Callirrhoe", "Easy-going", Gender::Female),
            ("Autonoe", "Bright", Gender::Female),
            ("Enceladus", "Breathy", Gender::Male),
            ("Iapetus", "Clear", Gender::Male),
            ("Umbriel", "Easy-going", Gender::Male),
            ("Algieba", "Smooth", Gender::Male),
            ("Despina", "Smooth", Gender::Female),
            ("Erinome", "Clear", Gender::Female),
            ("Algenib", "Gravelly", Gender::Male),
            ("Rasalgethi", "Informative", Gender::Male),
            ("Laomedeia", "Upbeat", Gender::Female),
            ("Achernar", "Soft", Gender::Female),
            ("Alnilam", "Firm", Gender::Male),
            ("Schedar", "Even", Gender::Male),
            ("Gacrux", "Mature", Gender::Female),
            ("Pulcherrima", "Forward", Gender::Female),
            ("Achird", "Friendly", Gender::Male),
            ("Zubenelgenubi", "Casual", Gender::Male),
            ("Vindemiatrix", "Gentle", Gender::Female),
            ("Sadachbia", "Lively", Gender::Male),
            ("Sadaltager", "Knowledgeable", Gender::Male),
            ("Sulafat", "Warm", Gender::Female),
        ]
        .into_iter()
        .map(|(name, style, gender)| Voice::new(name, style, gender))
        .collect();

        Self::new(voices)
    }

    /// Looks up a voice by name, case-insensitively.
    ///
    /// Returns the catalog entry with its canonical capitalization.
    pub fn find(&self, name: &str) -> Option<&Voice> {
        let name = name.trim();
        self.voices
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Returns all voices of the given gender, in catalog order.
    pub fn of_gender(&self, gender: Gender) -> impl Iterator<Item = &Voice> {
        self.voices.iter().filter(move |v| v.gender == gender)
    }

    /// Returns the first voice of the given gender, if any.
    pub fn first_of_gender(&self, gender: Gender) -> Option<&Voice> {
        self.of_gender(gender).next()
    }

    /// Iterates over all voices in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    /// Returns the number of voices.
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Returns true if the catalog has no voices.
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prebuilt_catalog_shape() {
        let catalog = VoiceCatalog::prebuilt();
        assert_eq!(catalog.len(), 30);
        assert!(catalog.first_of_gender(Gender::Male).is_some());
        assert!(catalog.first_of_gender(Gender::Female).is_some());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = VoiceCatalog::prebuilt();
        assert_eq!(catalog.find("kore").unwrap().name, "Kore");
        assert_eq!(catalog.find(" ZEPHYR ").unwrap().name, "Zephyr");
        assert!(catalog.find("nonexistent").is_none());
    }

    #[test]
    fn test_of_gender_preserves_order() {
        let catalog = VoiceCatalog::prebuilt();
        let males: Vec<&str> = catalog.of_gender(Gender::Male).map(|v| v.name.as_str()).collect();
        assert_eq!(males.first(), Some(&"Puck"));
        let females: Vec<&str> = catalog
            .of_gender(Gender::Female)
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(females.first(), Some(&"Zephyr"));
        assert_eq!(males.len() + females.len(), catalog.len());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = VoiceCatalog::new(vec![Voice::new("Solo", "Even", Gender::Male)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.first_of_gender(Gender::Female).is_none());
    }
}
