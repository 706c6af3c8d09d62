use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Moderation state of a text record. The transition is one-way:
/// pending -> approved | rejected, no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TextStatus {
    Pending,
    Approved,
    Rejected,
}

/// A corpus text record. The single row structure used uniformly by every
/// store backend; adapters map raw rows into it exactly once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TextRecord {
    pub id: i64,
    /// isiZulu title.
    pub title: String,
    pub title_en: String,
    /// isiZulu short form.
    pub content: String,
    pub content_en: String,
    /// Optional long form; callers fall back to `content` when absent.
    pub full_content: Option<String>,
    pub full_content_en: Option<String>,
    /// Canonical category vocabulary key.
    pub category: String,
    pub date_added: String,
    /// Whitespace token count over content + full_content, fixed at write time.
    pub word_count: i64,
    /// Distinct whitespace token count, fixed at write time.
    pub unique_words: i64,
    pub source: Option<String>,
    /// Owned by the identity subsystem; opaque here.
    pub contributor_id: Option<i64>,
    pub status: TextStatus,
}

/// Payload for inserting a new text. Word metrics are derived by the store
/// at insert time, never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewText {
    pub title: String,
    pub title_en: String,
    pub content: String,
    pub content_en: String,
    #[serde(default)]
    pub full_content: Option<String>,
    #[serde(default)]
    pub full_content_en: Option<String>,
    pub category: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub contributor_id: Option<i64>,
}

impl NewText {
    /// (word_count, unique_words) over the source-language content plus the
    /// optional long form, split on whitespace. This is a coarser measure
    /// than the statistics tokenizer and the two are not expected to agree.
    pub fn word_metrics(&self) -> (i64, i64) {
        let full = self.full_content.as_deref().unwrap_or("");
        let all_text = format!("{} {}", self.content, full);
        let words: Vec<&str> = all_text.split_whitespace().collect();
        let unique: HashSet<&str> = words.iter().copied().collect();
        (words.len() as i64, unique.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_text(content: &str, full: Option<&str>) -> NewText {
        NewText {
            title: "t".to_string(),
            title_en: "t".to_string(),
            content: content.to_string(),
            content_en: String::new(),
            full_content: full.map(|s| s.to_string()),
            full_content_en: None,
            category: "other".to_string(),
            source: None,
            contributor_id: None,
        }
    }

    #[test]
    fn test_word_metrics() {
        let (count, unique) = new_text("umuntu ngumuntu ngabantu", None).word_metrics();
        assert_eq!(count, 3);
        assert_eq!(unique, 3);

        let (count, unique) = new_text("aa bb", Some("aa cc")).word_metrics();
        assert_eq!(count, 4);
        assert_eq!(unique, 3);
    }

    #[test]
    fn test_word_metrics_empty() {
        let (count, unique) = new_text("", None).word_metrics();
        assert_eq!(count, 0);
        assert_eq!(unique, 0);
    }
}
