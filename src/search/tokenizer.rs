//! Word extractor for frequency analysis.
//!
//! Lower-cases the input and takes maximal runs of alphabetic characters.
//! The pattern is Unicode-aware so isiZulu text carrying Latin Extended-A
//! codepoints segments correctly; digits and punctuation never appear in a
//! token. Tokens of MIN_TOKEN_CHARS characters or fewer are dropped — the
//! threshold matches the corpus's existing statistics and must not drift.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens of this many characters or fewer are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Alphabetic}+").unwrap());

/// Extract normalized word tokens in left-to-right order. Pure; empty input
/// yields an empty sequence.
pub fn extract_words(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}
