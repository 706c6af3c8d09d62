//! Raw search string -> structured search intent.
//!
//! The parser is total: every input string, however malformed, produces a
//! valid (possibly empty) ParsedQuery. Extraction is ordered and each step
//! consumes what it matched, so later steps only see the remainder:
//!
//! 1. double-quoted phrases (non-greedy, no escape handling)
//! 2. key:value filters (value quoted or a single non-whitespace run;
//!    duplicate keys keep the last value)
//! 3. whitespace-split free terms
//! 4. whole-string category resolution against the original trimmed input —
//!    an exact vocabulary hit makes this a pure category search

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::category::CategoryVocabulary;

static PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*?)""#).unwrap());
static FILTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\w+):("([^"]*)"|\S+)"#).unwrap());

/// Structured search intent for one request. Ephemeral; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedQuery {
    /// Trimmed original input.
    pub raw: String,
    pub phrases: Vec<String>,
    pub terms: Vec<String>,
    pub filters: BTreeMap<String, String>,
    /// Resolved category key when the whole input names a category.
    pub category: Option<String>,
}

impl ParsedQuery {
    /// Whole input exactly named a category; takes precedence over
    /// term/phrase search in the executor.
    pub fn is_category_search(&self) -> bool {
        self.category.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The literal strings the executor matches and highlights.
    pub fn needles(&self) -> impl Iterator<Item = &str> {
        self.phrases
            .iter()
            .map(String::as_str)
            .chain(self.terms.iter().map(String::as_str))
    }
}

pub struct QueryParser {
    vocab: CategoryVocabulary,
}

impl QueryParser {
    pub fn new(vocab: CategoryVocabulary) -> Self {
        Self { vocab }
    }

    pub fn parse(&self, raw: &str) -> ParsedQuery {
        let trimmed = raw.trim();
        let mut parsed = ParsedQuery {
            raw: trimmed.to_string(),
            ..Default::default()
        };
        if trimmed.is_empty() {
            return parsed;
        }

        let mut working = trimmed.to_string();

        for cap in PHRASE_RE.captures_iter(&working) {
            let phrase = cap[1].trim();
            if !phrase.is_empty() {
                parsed.phrases.push(phrase.to_string());
            }
        }
        working = PHRASE_RE.replace_all(&working, " ").into_owned();

        for cap in FILTER_RE.captures_iter(&working) {
            let key = cap[1].to_lowercase();
            // quoted values land in group 3, bare values in group 2
            let value = cap
                .get(3)
                .or_else(|| cap.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            parsed.filters.insert(key, value.to_string());
        }
        working = FILTER_RE.replace_all(&working, " ").into_owned();

        parsed.terms = working.split_whitespace().map(String::from).collect();

        // Resolution runs over the original input, not the remainder: a
        // category name with anything else around it is a term search.
        parsed.category = self.vocab.resolve(trimmed).map(String::from);

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> QueryParser {
        QueryParser::new(CategoryVocabulary::standard())
    }

    #[test]
    fn test_empty_input() {
        let parsed = parser().parse("   ");
        assert!(parsed.is_empty());
        assert!(parsed.phrases.is_empty());
        assert!(parsed.terms.is_empty());
        assert!(parsed.filters.is_empty());
        assert_eq!(parsed.category, None);
    }

    #[test]
    fn test_pure_category_search() {
        let parsed = parser().parse("izaga");
        assert!(parsed.is_category_search());
        assert_eq!(parsed.category.as_deref(), Some("izaga"));

        // display-name aliases resolve too
        let parsed = parser().parse("Proverbs");
        assert_eq!(parsed.category.as_deref(), Some("izaga"));
    }

    #[test]
    fn test_category_plus_terms_is_not_category_search() {
        let parsed = parser().parse("izaga history");
        assert!(!parsed.is_category_search());
        assert_eq!(parsed.terms, vec!["izaga", "history"]);
    }

    #[test]
    fn test_phrases_filters_terms() {
        let parsed = parser().parse(r#""umuntu ngumuntu" category:izaga extra"#);
        assert_eq!(parsed.phrases, vec!["umuntu ngumuntu"]);
        assert_eq!(parsed.filters.get("category").map(String::as_str), Some("izaga"));
        assert_eq!(parsed.terms, vec!["extra"]);
        assert!(!parsed.is_category_search());
    }

    #[test]
    fn test_duplicate_filter_keys_last_wins() {
        let parsed = parser().parse("title:first title:second");
        assert_eq!(parsed.filters.get("title").map(String::as_str), Some("second"));
        assert_eq!(parsed.filters.len(), 1);
    }

    #[test]
    fn test_filter_key_lowercased() {
        let parsed = parser().parse("TITLE:Shaka");
        assert_eq!(parsed.filters.get("title").map(String::as_str), Some("Shaka"));
    }

    #[test]
    fn test_unbalanced_quote_is_total() {
        let parsed = parser().parse(r#"abc "def"#);
        assert!(parsed.phrases.is_empty());
        assert_eq!(parsed.terms, vec!["abc", "\"def"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        // Re-parsing what survived extraction finds nothing new to extract.
        let parsed = parser().parse(r#""indlela ibuzwa" title:shaka ubuntu okunye extra"#);
        let remainder = parsed.terms.join(" ");
        let reparsed = parser().parse(&remainder);
        assert!(reparsed.phrases.is_empty());
        assert!(reparsed.filters.is_empty());
        assert_eq!(reparsed.terms, parsed.terms);
    }

    #[test]
    fn test_empty_phrase_discarded() {
        let parsed = parser().parse(r#""" ubuntu"#);
        assert!(parsed.phrases.is_empty());
        assert_eq!(parsed.terms, vec!["ubuntu"]);
    }
}
