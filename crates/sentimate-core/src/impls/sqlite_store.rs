//! SqliteSentimentStore - SQLite による SentimentRepository 実装
//!
//! 同期的な rusqlite の I/O は tokio の blocking pool で実行し、
//! async worker スレッドを塞がないようにします。

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{
    NewReviewSentiment, RecordId, ReviewId, ReviewSentimentRecord, SentimentResult, StoreError,
};
use crate::ports::SentimentRepository;

pub const MAIN_TABLE: &str = "sentimate_review_sentiment";
pub const ID_FIELD_NAME: &str = "review_sentiment_id";

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Async-safe handle to the sentiment table.
#[derive(Clone)]
pub struct SqliteSentimentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSentimentStore {
    /// Open (or create) a SQLite database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Create an in-memory SQLite database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(&format!(
            "
            CREATE TABLE IF NOT EXISTS {MAIN_TABLE} (
                {ID_FIELD_NAME} INTEGER PRIMARY KEY AUTOINCREMENT,
                review_id INTEGER NOT NULL,
                type TEXT NOT NULL,
                score REAL NOT NULL,
                ratio REAL NOT NULL,
                analyzed_at TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_{MAIN_TABLE}_review
                ON {MAIN_TABLE}(review_id);
            "
        ))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure with the connection on a blocking thread.
    async fn call<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::Backend(format!("DB lock poisoned: {e}")))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("DB task panicked: {e}")))?
    }
}

#[async_trait]
impl SentimentRepository for SqliteSentimentStore {
    async fn upsert(&self, record: NewReviewSentiment) -> Result<RecordId, StoreError> {
        self.call(move |conn| {
            let id: i64 = conn.query_row(
                &format!(
                    "INSERT INTO {MAIN_TABLE} (review_id, type, score, ratio, analyzed_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(review_id) DO UPDATE SET
                         type = excluded.type,
                         score = excluded.score,
                         ratio = excluded.ratio,
                         analyzed_at = excluded.analyzed_at
                     RETURNING {ID_FIELD_NAME}"
                ),
                params![
                    record.review_id.get(),
                    record.sentiment.kind,
                    record.sentiment.score,
                    record.sentiment.ratio,
                    record.analyzed_at.to_rfc3339(),
                ],
                |row| row.get(0),
            )?;
            Ok(RecordId::new(id))
        })
        .await
    }

    async fn find_by_review_id(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<ReviewSentimentRecord>, StoreError> {
        self.call(move |conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {ID_FIELD_NAME}, review_id, type, score, ratio, analyzed_at
                         FROM {MAIN_TABLE} WHERE review_id = ?1"
                    ),
                    params![review_id.get()],
                    |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, f64>(3)?,
                            row.get::<_, f64>(4)?,
                            row.get::<_, String>(5)?,
                        ))
                    },
                )
                .optional()?;

            let Some((id, review_id, kind, score, ratio, analyzed_at)) = row else {
                return Ok(None);
            };

            let analyzed_at = DateTime::parse_from_rfc3339(&analyzed_at)
                .map_err(|e| StoreError::Backend(format!("bad analyzed_at {analyzed_at:?}: {e}")))?
                .with_timezone(&Utc);

            Ok(Some(ReviewSentimentRecord {
                id: RecordId::new(id),
                review_id: ReviewId::new(review_id),
                sentiment: SentimentResult::new(kind, score, ratio),
                analyzed_at,
            }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_record(review_id: i64, kind: &str) -> NewReviewSentiment {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        NewReviewSentiment::new(
            ReviewId::new(review_id),
            SentimentResult::new(kind, 0.9, 0.8),
            at,
        )
    }

    #[tokio::test]
    async fn upsert_then_find() {
        let store = SqliteSentimentStore::open_in_memory().unwrap();
        let id = store.upsert(new_record(42, "positive")).await.unwrap();

        let found = store
            .find_by_review_id(ReviewId::new(42))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.review_id, ReviewId::new(42));
        assert_eq!(found.sentiment, SentimentResult::new("positive", 0.9, 0.8));
        assert_eq!(found.analyzed_at, new_record(42, "positive").analyzed_at);
    }

    #[tokio::test]
    async fn missing_review_is_none() {
        let store = SqliteSentimentStore::open_in_memory().unwrap();
        let found = store.find_by_review_id(ReviewId::new(7)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn redelivery_replaces_instead_of_duplicating() {
        let store = SqliteSentimentStore::open_in_memory().unwrap();
        let first = store.upsert(new_record(42, "positive")).await.unwrap();
        let second = store.upsert(new_record(42, "negative")).await.unwrap();
        assert_eq!(first, second);

        let count: i64 = store
            .call(|conn| {
                Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {MAIN_TABLE}"), [], |r| {
                    r.get(0)
                })?)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);

        let found = store
            .find_by_review_id(ReviewId::new(42))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.sentiment.kind, "negative");
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentimate.db");

        let store = SqliteSentimentStore::open(&path).unwrap();
        store.upsert(new_record(1, "neutral")).await.unwrap();
        drop(store);

        let reopened = SqliteSentimentStore::open(&path).unwrap();
        let found = reopened.find_by_review_id(ReviewId::new(1)).await.unwrap();
        assert_eq!(found.map(|r| r.sentiment.kind).as_deref(), Some("neutral"));
    }
}
