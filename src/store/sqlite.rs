//! SQLite-backed corpus store.
//!
//! Predicates are assembled with sqlx's QueryBuilder and bound parameters;
//! substring matching uses LOWER(...) LIKE with a %needle% pattern, the
//! same containment semantics the in-memory backend implements in Rust.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{CategoryCount, CorpusStore, TextQuery, SEARCH_FIELDS};
use crate::error::StoreError;
use crate::models::{NewText, TextRecord, TextStatus};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the texts table and supporting indexes. Only creates what is
    /// missing; existing data is untouched.
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS texts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                title_en TEXT NOT NULL,
                content TEXT NOT NULL,
                content_en TEXT NOT NULL,
                full_content TEXT,
                full_content_en TEXT,
                category TEXT NOT NULL,
                date_added TEXT NOT NULL,
                word_count INTEGER NOT NULL DEFAULT 0,
                unique_words INTEGER NOT NULL DEFAULT 0,
                source TEXT,
                contributor_id INTEGER,
                status TEXT NOT NULL DEFAULT 'pending'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_texts_status ON texts(status)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_texts_category ON texts(category)")
            .execute(&self.pool)
            .await?;

        tracing::info!("Corpus schema ready");
        Ok(())
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", needle.to_lowercase())
}

/// Append the WHERE clause for a TextQuery.
fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, query: &TextQuery) {
    qb.push(" WHERE 1=1");

    if let Some(status) = query.status {
        qb.push(" AND status = ").push_bind(status);
    }

    if let Some(ref category) = query.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }

    if !query.contains_any.is_empty() {
        qb.push(" AND (");
        let mut first = true;
        for term in &query.contains_any {
            let pattern = like_pattern(term);
            for field in SEARCH_FIELDS {
                if !first {
                    qb.push(" OR ");
                }
                first = false;
                qb.push("LOWER(COALESCE(")
                    .push(field.column())
                    .push(", '')) LIKE ")
                    .push_bind(pattern.clone());
            }
        }
        qb.push(")");
    }

    for narrowed in &query.narrowed {
        qb.push(" AND (");
        let pattern = like_pattern(&narrowed.needle);
        let mut first = true;
        for field in &narrowed.fields {
            if !first {
                qb.push(" OR ");
            }
            first = false;
            qb.push("LOWER(COALESCE(")
                .push(field.column())
                .push(", '')) LIKE ")
                .push_bind(pattern.clone());
        }
        qb.push(")");
    }
}

#[async_trait]
impl CorpusStore for SqliteStore {
    async fn count(&self, query: &TextQuery) -> Result<u64, StoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM texts");
        push_predicate(&mut qb, query);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    async fn fetch_page(
        &self,
        query: &TextQuery,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TextRecord>, StoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM texts");
        push_predicate(&mut qb, query);
        qb.push(" ORDER BY id DESC LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset as i64);

        let rows = qb.build_query_as::<TextRecord>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn fetch_approved(&self) -> Result<Vec<TextRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TextRecord>(
            "SELECT * FROM texts WHERE status = 'approved' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<TextRecord, StoreError> {
        sqlx::query_as::<_, TextRecord>("SELECT * FROM texts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, text: &NewText, status: TextStatus) -> Result<i64, StoreError> {
        let (word_count, unique_words) = text.word_metrics();
        let date_added = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO texts
                (title, title_en, content, content_en, full_content, full_content_en,
                 category, date_added, word_count, unique_words, source, contributor_id, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&text.title)
        .bind(&text.title_en)
        .bind(&text.content)
        .bind(&text.content_en)
        .bind(&text.full_content)
        .bind(&text.full_content_en)
        .bind(&text.category)
        .bind(&date_added)
        .bind(word_count)
        .bind(unique_words)
        .bind(&text.source)
        .bind(text.contributor_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_status(&self, id: i64, status: TextStatus) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE texts SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) as count FROM texts
            WHERE status = 'approved'
            GROUP BY category ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldContains;
    use crate::store::TextField;

    async fn test_store() -> SqliteStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let store = SqliteStore::new(pool);
        store.init().await.unwrap();
        store
    }

    fn sample(title: &str, content: &str, category: &str) -> NewText {
        NewText {
            title: title.to_string(),
            title_en: format!("{} (en)", title),
            content: content.to_string(),
            content_en: format!("{} english", content),
            full_content: None,
            full_content_en: None,
            category: category.to_string(),
            source: None,
            contributor_id: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let store = test_store().await;
        let id = store
            .insert(&sample("Indlela", "ibuzwa kwabaphambili", "izaga"), TextStatus::Approved)
            .await
            .unwrap();

        let record = store.fetch_by_id(id).await.unwrap();
        assert_eq!(record.title, "Indlela");
        assert_eq!(record.status, TextStatus::Approved);
        assert_eq!(record.word_count, 2);
        assert_eq!(record.unique_words, 2);
    }

    #[tokio::test]
    async fn test_fetch_by_id_not_found() {
        let store = test_store().await;
        match store.fetch_by_id(42).await {
            Err(StoreError::NotFound(42)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_count_excludes_unapproved() {
        let store = test_store().await;
        for status in [TextStatus::Approved, TextStatus::Approved, TextStatus::Pending] {
            store
                .insert(&sample("Umuntu", "ngumuntu ngabantu", "izaga"), status)
                .await
                .unwrap();
        }

        let mut query = TextQuery::approved();
        query.contains_any = vec!["ngumuntu".to_string()];
        assert_eq!(store.count(&query).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_page_orders_by_id_desc() {
        let store = test_store().await;
        for i in 0..3 {
            store
                .insert(&sample(&format!("T{}", i), "okufanayo", "other"), TextStatus::Approved)
                .await
                .unwrap();
        }

        let rows = store.fetch_page(&TextQuery::approved(), 10, 0).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_narrowed_predicate() {
        let store = test_store().await;
        store
            .insert(&sample("Izibongo zikaShaka", "amadoda", "izibongo"), TextStatus::Approved)
            .await
            .unwrap();
        store
            .insert(&sample("Okunye", "shaka kusodwa", "other"), TextStatus::Approved)
            .await
            .unwrap();

        let mut query = TextQuery::approved();
        query.narrowed.push(FieldContains {
            fields: vec![TextField::Title, TextField::TitleEn],
            needle: "shaka".to_string(),
        });
        assert_eq!(store.count(&query).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = test_store().await;
        let id = store
            .insert(&sample("Okulindile", "okulindile", "other"), TextStatus::Pending)
            .await
            .unwrap();

        store.update_status(id, TextStatus::Approved).await.unwrap();
        let record = store.fetch_by_id(id).await.unwrap();
        assert_eq!(record.status, TextStatus::Approved);

        assert!(matches!(
            store.update_status(999, TextStatus::Rejected).await,
            Err(StoreError::NotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_category_counts() {
        let store = test_store().await;
        store.insert(&sample("A", "a", "izaga"), TextStatus::Approved).await.unwrap();
        store.insert(&sample("B", "b", "izaga"), TextStatus::Approved).await.unwrap();
        store.insert(&sample("C", "c", "history"), TextStatus::Approved).await.unwrap();
        store.insert(&sample("D", "d", "izaga"), TextStatus::Pending).await.unwrap();

        let counts = store.category_counts().await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].category, "history");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].category, "izaga");
        assert_eq!(counts[1].count, 2);
    }
}
