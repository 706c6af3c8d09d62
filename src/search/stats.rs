//! Corpus-wide lexical statistics.
//!
//! Every call re-scans the approved corpus — no memoization. Each language
//! gets its own token stream built from the three relevant fields of every
//! record; frequency tables come from those streams while the scalar totals
//! come from the persisted per-record word metrics. The two measurement
//! methods differ (tokenizer threshold vs whitespace split) and are not
//! expected to agree.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::error::StoreError;
use crate::models::TextRecord;
use crate::store::{CategoryCount, CorpusStore};

use super::tokenizer::extract_words;

/// Word-frequency table size.
pub const TOP_WORDS: usize = 20;
/// Adjacent-pair table size.
pub const TOP_PAIRS: usize = 10;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WordPairFrequency {
    pub word1: String,
    pub word2: String,
    pub frequency: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatTotals {
    pub total_texts: u64,
    /// Sum of the stored per-record word_count column.
    pub total_words: i64,
    /// Sum of the stored per-record unique_words column.
    pub total_unique_words: i64,
    /// total_words / max(total_texts, 1)
    pub avg_word_length: f64,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorpusStatistics {
    pub totals: StatTotals,
    pub zu_word_frequency: Vec<WordFrequency>,
    pub en_word_frequency: Vec<WordFrequency>,
    pub zu_word_pairs: Vec<WordPairFrequency>,
    pub en_word_pairs: Vec<WordPairFrequency>,
    pub category_stats: Vec<CategoryCount>,
}

pub struct StatisticsEngine {
    store: Arc<dyn CorpusStore>,
}

impl StatisticsEngine {
    pub fn new(store: Arc<dyn CorpusStore>) -> Self {
        Self { store }
    }

    /// Compute the full statistics block. A store failure mid-scan fails the
    /// whole call; partial tables are never returned.
    pub async fn compute_statistics(&self) -> Result<CorpusStatistics, StoreError> {
        let texts = self.store.fetch_approved().await?;

        let mut total_words: i64 = 0;
        let mut total_unique_words: i64 = 0;
        let mut all_zu = String::new();
        let mut all_en = String::new();

        for text in &texts {
            total_words += text.word_count;
            total_unique_words += text.unique_words;
            push_fields(&mut all_zu, &text.title, &text.content, text.full_content.as_deref());
            push_fields(&mut all_en, &text.title_en, &text.content_en, text.full_content_en.as_deref());
        }

        let zu_words = extract_words(&all_zu);
        let en_words = extract_words(&all_en);

        let total_texts = texts.len() as u64;
        let totals = StatTotals {
            total_texts,
            total_words,
            total_unique_words,
            avg_word_length: total_words as f64 / total_texts.max(1) as f64,
            last_updated: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        let category_stats = self.store.category_counts().await?;

        Ok(CorpusStatistics {
            totals,
            zu_word_frequency: word_frequency(&zu_words, TOP_WORDS),
            en_word_frequency: word_frequency(&en_words, TOP_WORDS),
            zu_word_pairs: pair_frequency(&zu_words, TOP_PAIRS),
            en_word_pairs: pair_frequency(&en_words, TOP_PAIRS),
            category_stats,
        })
    }

    /// Total non-overlapping case-insensitive occurrences of `term` across
    /// the six text fields of every approved record. Reported alongside
    /// term searches; never computed for category searches.
    pub async fn count_occurrences(&self, term: &str) -> Result<u64, StoreError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(0);
        }

        let texts = self.store.fetch_approved().await?;
        let mut total: u64 = 0;
        for text in &texts {
            let combined = combined_fields(text).to_lowercase();
            total += combined.matches(&needle).count() as u64;
        }
        Ok(total)
    }
}

fn push_fields(buf: &mut String, title: &str, content: &str, full_content: Option<&str>) {
    buf.push(' ');
    buf.push_str(title);
    buf.push(' ');
    buf.push_str(content);
    buf.push(' ');
    buf.push_str(full_content.unwrap_or(""));
}

fn combined_fields(text: &TextRecord) -> String {
    format!(
        "{} {} {} {} {} {}",
        text.title,
        text.title_en,
        text.content,
        text.content_en,
        text.full_content.as_deref().unwrap_or(""),
        text.full_content_en.as_deref().unwrap_or(""),
    )
}

/// Top-N tokens by (count desc, token asc). The secondary key makes tied
/// counts reproducible across runs.
fn word_frequency(words: &[String], top: usize) -> Vec<WordFrequency> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_default() += 1;
    }

    let mut table: Vec<WordFrequency> = counts
        .into_iter()
        .map(|(word, frequency)| WordFrequency {
            word: word.to_string(),
            frequency,
        })
        .collect();
    table.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.word.cmp(&b.word)));
    table.truncate(top);
    table
}

/// Top-N adjacent pairs over a sliding window of width 2, same ordering
/// rule as the single-word table.
fn pair_frequency(words: &[String], top: usize) -> Vec<WordPairFrequency> {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    for pair in words.windows(2) {
        *counts.entry((pair[0].as_str(), pair[1].as_str())).or_default() += 1;
    }

    let mut table: Vec<WordPairFrequency> = counts
        .into_iter()
        .map(|((word1, word2), frequency)| WordPairFrequency {
            word1: word1.to_string(),
            word2: word2.to_string(),
            frequency,
        })
        .collect();
    table.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then(a.word1.cmp(&b.word1))
            .then(a.word2.cmp(&b.word2))
    });
    table.truncate(top);
    table
}
