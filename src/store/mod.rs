//! Corpus store abstraction.
//!
//! The core talks to the persisted text records through one trait and never
//! branches on backend identity. Two interchangeable implementations:
//! - SQLite (sqlx): the durable backend
//! - in-memory: test double and embedded fallback
//!
//! The contract is deliberately small: predicate count, paginated predicate
//! fetch with a deterministic order (id descending), approved-only full
//! scan, lookup by id, insert, status update, per-category counts.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{NewText, TextRecord, TextStatus};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A queryable text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    TitleEn,
    Content,
    ContentEn,
    FullContent,
    FullContentEn,
    Category,
}

impl TextField {
    pub fn column(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::TitleEn => "title_en",
            TextField::Content => "content",
            TextField::ContentEn => "content_en",
            TextField::FullContent => "full_content",
            TextField::FullContentEn => "full_content_en",
            TextField::Category => "category",
        }
    }
}

/// The fields a free term is matched against.
pub const SEARCH_FIELDS: &[TextField] = &[
    TextField::Title,
    TextField::TitleEn,
    TextField::Content,
    TextField::ContentEn,
    TextField::FullContent,
    TextField::FullContentEn,
    TextField::Category,
];

/// One conjunct narrowing the match to a named field group: at least one of
/// `fields` must contain `needle` (case-insensitive substring).
#[derive(Debug, Clone)]
pub struct FieldContains {
    pub fields: Vec<TextField>,
    pub needle: String,
}

/// Predicate over the texts relation. All present parts are ANDed;
/// `contains_any` is a single disjunction over every (term, field) pair.
#[derive(Debug, Clone, Default)]
pub struct TextQuery {
    pub status: Option<TextStatus>,
    /// Exact equality on the category key.
    pub category: Option<String>,
    /// Case-insensitive substring containment, any term in any search field.
    pub contains_any: Vec<String>,
    pub narrowed: Vec<FieldContains>,
}

impl TextQuery {
    pub fn approved() -> Self {
        Self {
            status: Some(TextStatus::Approved),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Abstract interface to the persisted text records.
///
/// Implementations must give read-committed-or-stronger isolation so a
/// paginated fetch after a count within one logical request does not observe
/// fewer rows than counted; a momentary mismatch from interleaved moderation
/// writes is accepted, not fatal.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Number of records matching the predicate.
    async fn count(&self, query: &TextQuery) -> Result<u64, StoreError>;

    /// Matching records ordered by id descending, paginated.
    async fn fetch_page(
        &self,
        query: &TextQuery,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TextRecord>, StoreError>;

    /// Full scan of approved records, ordered by id ascending.
    async fn fetch_approved(&self) -> Result<Vec<TextRecord>, StoreError>;

    /// Lookup by identifier regardless of status. `StoreError::NotFound`
    /// when no record matches — never an empty success.
    async fn fetch_by_id(&self, id: i64) -> Result<TextRecord, StoreError>;

    /// Insert a new record in the given status; word metrics are derived
    /// here, at write time. Returns the assigned identifier.
    async fn insert(&self, text: &NewText, status: TextStatus) -> Result<i64, StoreError>;

    /// Set the moderation status of a record. `StoreError::NotFound` when
    /// the id does not exist.
    async fn update_status(&self, id: i64, status: TextStatus) -> Result<(), StoreError>;

    /// Approved record counts per category, ordered by category key.
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, StoreError>;
}
