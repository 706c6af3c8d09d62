//! Executes parsed search intent against the corpus store.
//!
//! A category search is exact equality on the category key; anything else
//! becomes one disjunctive substring predicate over the searchable fields,
//! narrowed by explicit field filters. Count first, then fetch the page,
//! then decorate rows (snippet, highlights, category display names).
//! Only approved records are ever visible here.

use std::sync::Arc;

use serde::Serialize;

use crate::category::{CategoryVocabulary, Language};
use crate::error::StoreError;
use crate::models::TextRecord;
use crate::store::{CorpusStore, FieldContains, TextField, TextQuery};

use super::query::ParsedQuery;

/// Character budget for result snippets.
pub const SNIPPET_CHARS: usize = 300;

#[derive(Debug, Clone, Serialize)]
pub struct SearchRow {
    pub id: i64,
    pub title: String,
    pub title_en: String,
    /// Bilingual content excerpt with `<mark>` highlights.
    pub snippet: String,
    pub category: String,
    pub category_zu: String,
    pub category_en: String,
    pub word_count: i64,
    pub unique_words: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub rows: Vec<SearchRow>,
    pub total_results: u64,
    /// ceil(total_results / page_size), never below 1.
    pub total_pages: u64,
    pub page: u32,
    pub is_category_search: bool,
}

pub struct SearchExecutor {
    store: Arc<dyn CorpusStore>,
    vocab: CategoryVocabulary,
}

impl SearchExecutor {
    pub fn new(store: Arc<dyn CorpusStore>, vocab: CategoryVocabulary) -> Self {
        Self { store, vocab }
    }

    /// Run a parsed query. `page` is 1-based and coerced to 1 when below.
    pub async fn search(
        &self,
        parsed: &ParsedQuery,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResults, StoreError> {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let query = self.build_query(parsed);

        // An input with nothing to match never touches the store; zero
        // matches is a valid outcome, not an error, and still reports one
        // (empty) page.
        let no_predicate =
            query.category.is_none() && query.contains_any.is_empty() && query.narrowed.is_empty();
        if parsed.is_empty() || no_predicate {
            return Ok(SearchResults {
                rows: Vec::new(),
                total_results: 0,
                total_pages: 1,
                page,
                is_category_search: false,
            });
        }

        let total_results = self.store.count(&query).await?;
        let total_pages = (total_results.div_ceil(page_size as u64)).max(1);

        let offset = (page - 1) * page_size;
        let records = self.store.fetch_page(&query, page_size, offset).await?;

        let rows = records.iter().map(|r| self.decorate(r, parsed)).collect();

        Ok(SearchResults {
            rows,
            total_results,
            total_pages,
            page,
            is_category_search: parsed.is_category_search(),
        })
    }

    fn build_query(&self, parsed: &ParsedQuery) -> TextQuery {
        let mut query = TextQuery::approved();

        if let Some(ref key) = parsed.category {
            query.category = Some(key.clone());
            return query;
        }

        query.contains_any = parsed
            .phrases
            .iter()
            .chain(parsed.terms.iter())
            .chain(parsed.filters.values())
            .cloned()
            .collect();

        for (key, value) in &parsed.filters {
            match key.as_str() {
                "title" => query.narrowed.push(FieldContains {
                    fields: vec![TextField::Title, TextField::TitleEn],
                    needle: value.clone(),
                }),
                "content" => query.narrowed.push(FieldContains {
                    fields: vec![
                        TextField::Content,
                        TextField::ContentEn,
                        TextField::FullContent,
                        TextField::FullContentEn,
                    ],
                    needle: value.clone(),
                }),
                "category" => match self.vocab.resolve(value) {
                    // alias resolves to a key: exact equality
                    Some(key) => query.category = Some(key.to_string()),
                    None => query.narrowed.push(FieldContains {
                        fields: vec![TextField::Category],
                        needle: value.clone(),
                    }),
                },
                // unknown filter keys still contribute their value to the
                // disjunction above but narrow nothing
                _ => {}
            }
        }

        query
    }

    fn decorate(&self, record: &TextRecord, parsed: &ParsedQuery) -> SearchRow {
        let mut snippet = truncate_chars(
            &format!("{} {}", record.content, record.content_en),
            SNIPPET_CHARS,
        );
        for needle in parsed.needles() {
            snippet = highlight(&snippet, needle);
        }

        SearchRow {
            id: record.id,
            title: record.title.clone(),
            title_en: record.title_en.clone(),
            snippet,
            category: record.category.clone(),
            category_zu: self.vocab.display_name(&record.category, Language::Zulu),
            category_en: self.vocab.display_name(&record.category, Language::English),
            word_count: record.word_count,
            unique_words: record.unique_words,
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

/// Case-sensitive literal replace. Overlapping or nested needles can
/// over- or under-highlight; that behavior is fixed and documented, not a
/// defect to repair here.
fn highlight(snippet: &str, needle: &str) -> String {
    if needle.is_empty() {
        return snippet.to_string();
    }
    snippet.replace(needle, &format!("<mark>{}</mark>", needle))
}
