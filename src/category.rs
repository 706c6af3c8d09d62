//! Controlled category vocabulary.
//!
//! Canonical keys are stable lowercase identifiers; each key carries an
//! isiZulu and an English display name. The table is fixed for the process
//! lifetime and read-only — components receive the vocabulary by value at
//! construction time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zulu,
    English,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryEntry {
    pub key: &'static str,
    pub name_zu: &'static str,
    pub name_en: &'static str,
}

const CATEGORIES: &[CategoryEntry] = &[
    CategoryEntry { key: "izaga", name_zu: "izaga", name_en: "proverbs" },
    CategoryEntry { key: "izibongo", name_zu: "izibongo", name_en: "praise poetry" },
    CategoryEntry { key: "izisho", name_zu: "izisho", name_en: "idioms" },
    CategoryEntry { key: "philosophy", name_zu: "ifilosofi", name_en: "philosophy" },
    CategoryEntry { key: "folktale", name_zu: "inganekwane", name_en: "folktale" },
    CategoryEntry { key: "history", name_zu: "umlando", name_en: "history" },
    CategoryEntry { key: "other", name_zu: "okunye", name_en: "other" },
];

#[derive(Debug, Clone, Copy)]
pub struct CategoryVocabulary {
    entries: &'static [CategoryEntry],
}

impl CategoryVocabulary {
    /// The standard vocabulary of the corpus.
    pub fn standard() -> Self {
        Self { entries: CATEGORIES }
    }

    pub fn entries(&self) -> &'static [CategoryEntry] {
        self.entries
    }

    /// Case-insensitive exact match against the canonical key or either
    /// display name. First match wins; no partial matching.
    pub fn resolve(&self, text: &str) -> Option<&'static str> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| {
                needle == e.key
                    || needle == e.name_zu.to_lowercase()
                    || needle == e.name_en.to_lowercase()
            })
            .map(|e| e.key)
    }

    /// Whether `key` is a canonical vocabulary key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Display string for a key in the requested language. Unknown keys fall
    /// back to the key itself; never fails.
    pub fn display_name(&self, key: &str, lang: Language) -> String {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| match lang {
                Language::Zulu => e.name_zu,
                Language::English => e.name_en,
            })
            .unwrap_or(key)
            .to_string()
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_key() {
        let vocab = CategoryVocabulary::standard();
        assert_eq!(vocab.resolve("izaga"), Some("izaga"));
        assert_eq!(vocab.resolve("  IZAGA  "), Some("izaga"));
    }

    #[test]
    fn test_resolve_by_display_name() {
        let vocab = CategoryVocabulary::standard();
        assert_eq!(vocab.resolve("proverbs"), Some("izaga"));
        assert_eq!(vocab.resolve("Praise Poetry"), Some("izibongo"));
        assert_eq!(vocab.resolve("umlando"), Some("history"));
        assert_eq!(vocab.resolve("ifilosofi"), Some("philosophy"));
    }

    #[test]
    fn test_resolve_exact_only() {
        let vocab = CategoryVocabulary::standard();
        assert_eq!(vocab.resolve("izaga history"), None);
        assert_eq!(vocab.resolve("prover"), None);
        assert_eq!(vocab.resolve(""), None);
    }

    #[test]
    fn test_display_name_fallback() {
        let vocab = CategoryVocabulary::standard();
        assert_eq!(vocab.display_name("izisho", Language::English), "idioms");
        assert_eq!(vocab.display_name("izisho", Language::Zulu), "izisho");
        assert_eq!(vocab.display_name("unknown", Language::English), "unknown");
    }
}
