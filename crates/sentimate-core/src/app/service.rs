//! ReviewSentimentService - sentiment レコードの保存と取得
//!
//! - `save`: 失敗はログに残して吸収し、`SaveOutcome` で返す
//! - `get_by_review_id`: 見つからなければ `StoreError::NotFound`（唯一呼び出し元に上がるエラー）

use std::sync::Arc;

use crate::domain::{NewReviewSentiment, ReviewId, ReviewSentimentRecord, SaveOutcome, StoreError};
use crate::ports::SentimentRepository;

pub struct ReviewSentimentService {
    repository: Arc<dyn SentimentRepository>,
}

impl ReviewSentimentService {
    pub fn new(repository: Arc<dyn SentimentRepository>) -> Self {
        Self { repository }
    }

    /// Save review sentiment analysis results.
    pub async fn save(&self, record: NewReviewSentiment) -> SaveOutcome {
        let review_id = record.review_id;
        match self.repository.upsert(record).await {
            Ok(id) => {
                tracing::debug!(%review_id, record_id = %id, "saved sentiment analysis");
                SaveOutcome::Saved(id)
            }
            Err(e) => {
                tracing::error!(%review_id, error = %e, "Failed to save sentiment analysis");
                SaveOutcome::Failed(e.to_string())
            }
        }
    }

    pub async fn get_by_review_id(
        &self,
        review_id: ReviewId,
    ) -> Result<ReviewSentimentRecord, StoreError> {
        self.repository
            .find_by_review_id(review_id)
            .await?
            .ok_or(StoreError::NotFound(review_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordId, SentimentResult};
    use crate::impls::InMemorySentimentStore;
    use async_trait::async_trait;
    use chrono::Utc;

    struct BrokenRepository;

    #[async_trait]
    impl SentimentRepository for BrokenRepository {
        async fn upsert(&self, _record: NewReviewSentiment) -> Result<RecordId, StoreError> {
            Err(StoreError::Backend("disk full".to_string()))
        }

        async fn find_by_review_id(
            &self,
            _review_id: ReviewId,
        ) -> Result<Option<ReviewSentimentRecord>, StoreError> {
            Err(StoreError::Backend("disk full".to_string()))
        }
    }

    fn new_record(review_id: i64) -> NewReviewSentiment {
        NewReviewSentiment::new(
            ReviewId::new(review_id),
            SentimentResult::new("positive", 0.9, 0.8),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn save_then_get() {
        let service = ReviewSentimentService::new(Arc::new(InMemorySentimentStore::new()));
        let outcome = service.save(new_record(42)).await;
        assert!(matches!(outcome, SaveOutcome::Saved(_)));

        let record = service.get_by_review_id(ReviewId::new(42)).await.unwrap();
        assert_eq!(record.sentiment.kind, "positive");
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let service = ReviewSentimentService::new(Arc::new(InMemorySentimentStore::new()));
        let err = service.get_by_review_id(ReviewId::new(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == ReviewId::new(99)));
    }

    #[tokio::test]
    async fn save_failure_is_absorbed() {
        let service = ReviewSentimentService::new(Arc::new(BrokenRepository));
        let outcome = service.save(new_record(1)).await;
        assert_eq!(outcome, SaveOutcome::Failed("storage backend failed: disk full".to_string()));
    }

    #[tokio::test]
    async fn backend_error_on_read_is_not_not_found() {
        let service = ReviewSentimentService::new(Arc::new(BrokenRepository));
        let err = service.get_by_review_id(ReviewId::new(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
