//! In-memory corpus store.
//!
//! Same predicate semantics as the SQLite backend, evaluated in Rust over a
//! Vec behind a RwLock. Used as the test double for the executor and the
//! statistics engine, and as an embedded backend for throwaway deployments.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{CategoryCount, CorpusStore, TextField, TextQuery, SEARCH_FIELDS};
use crate::error::StoreError;
use crate::models::{NewText, TextRecord, TextStatus};

#[derive(Default)]
struct Inner {
    records: Vec<TextRecord>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_value(record: &TextRecord, field: TextField) -> &str {
    match field {
        TextField::Title => &record.title,
        TextField::TitleEn => &record.title_en,
        TextField::Content => &record.content,
        TextField::ContentEn => &record.content_en,
        TextField::FullContent => record.full_content.as_deref().unwrap_or(""),
        TextField::FullContentEn => record.full_content_en.as_deref().unwrap_or(""),
        TextField::Category => &record.category,
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(record: &TextRecord, query: &TextQuery) -> bool {
    if let Some(status) = query.status {
        if record.status != status {
            return false;
        }
    }

    if let Some(ref category) = query.category {
        if &record.category != category {
            return false;
        }
    }

    if !query.contains_any.is_empty() {
        let hit = query.contains_any.iter().any(|term| {
            SEARCH_FIELDS
                .iter()
                .any(|&field| contains_ci(field_value(record, field), term))
        });
        if !hit {
            return false;
        }
    }

    query.narrowed.iter().all(|narrowed| {
        narrowed
            .fields
            .iter()
            .any(|&field| contains_ci(field_value(record, field), &narrowed.needle))
    })
}

#[async_trait]
impl CorpusStore for MemoryStore {
    async fn count(&self, query: &TextQuery) -> Result<u64, StoreError> {
        let inner = self.inner.read();
        Ok(inner.records.iter().filter(|r| matches(r, query)).count() as u64)
    }

    async fn fetch_page(
        &self,
        query: &TextQuery,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TextRecord>, StoreError> {
        let inner = self.inner.read();
        let mut rows: Vec<TextRecord> = inner
            .records
            .iter()
            .filter(|r| matches(r, query))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn fetch_approved(&self) -> Result<Vec<TextRecord>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .records
            .iter()
            .filter(|r| r.status == TextStatus::Approved)
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<TextRecord, StoreError> {
        let inner = self.inner.read();
        inner
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, text: &NewText, status: TextStatus) -> Result<i64, StoreError> {
        let (word_count, unique_words) = text.word_metrics();
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = inner.next_id;

        inner.records.push(TextRecord {
            id,
            title: text.title.clone(),
            title_en: text.title_en.clone(),
            content: text.content.clone(),
            content_en: text.content_en.clone(),
            full_content: text.full_content.clone(),
            full_content_en: text.full_content_en.clone(),
            category: text.category.clone(),
            date_added: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            word_count,
            unique_words,
            source: text.source.clone(),
            contributor_id: text.contributor_id,
            status,
        });
        Ok(id)
    }

    async fn update_status(&self, id: i64, status: TextStatus) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        match inner.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, StoreError> {
        let inner = self.inner.read();
        let mut counts: Vec<CategoryCount> = Vec::new();
        for record in inner.records.iter().filter(|r| r.status == TextStatus::Approved) {
            match counts.iter_mut().find(|c| c.category == record.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: record.category.clone(),
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldContains;

    fn sample(title: &str, content: &str, category: &str) -> NewText {
        NewText {
            title: title.to_string(),
            title_en: format!("{} (en)", title),
            content: content.to_string(),
            content_en: String::new(),
            full_content: None,
            full_content_en: None,
            category: category.to_string(),
            source: None,
            contributor_id: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let store = MemoryStore::new();
        let a = store.insert(&sample("A", "a", "other"), TextStatus::Approved).await.unwrap();
        let b = store.insert(&sample("B", "b", "other"), TextStatus::Approved).await.unwrap();
        assert!(b > a);

        let rows = store.fetch_page(&TextQuery::approved(), 10, 0).await.unwrap();
        assert_eq!(rows[0].id, b);
    }

    #[tokio::test]
    async fn test_contains_any_is_case_insensitive() {
        let store = MemoryStore::new();
        store
            .insert(&sample("Indlela", "Ibuzwa Kwabaphambili", "izaga"), TextStatus::Approved)
            .await
            .unwrap();

        let mut query = TextQuery::approved();
        query.contains_any = vec!["KWABAPHAMBILI".to_string()];
        assert_eq!(store.count(&query).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_narrowed_must_all_hold() {
        let store = MemoryStore::new();
        store
            .insert(&sample("Ubuntu botho", "umqondo wobuntu", "philosophy"), TextStatus::Approved)
            .await
            .unwrap();

        let mut query = TextQuery::approved();
        query.narrowed.push(FieldContains {
            fields: vec![TextField::Title],
            needle: "ubuntu".to_string(),
        });
        query.narrowed.push(FieldContains {
            fields: vec![TextField::Content],
            needle: "lutho".to_string(),
        });
        assert_eq!(store.count(&query).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pending_invisible_to_approved_scan() {
        let store = MemoryStore::new();
        store.insert(&sample("P", "p", "other"), TextStatus::Pending).await.unwrap();
        store.insert(&sample("A", "a", "other"), TextStatus::Approved).await.unwrap();

        let approved = store.fetch_approved().await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].title, "A");
    }
}
