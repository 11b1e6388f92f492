//! SentimentRepository port - sentiment レコードの永続化
//!
//! テーブル `sentimate_review_sentiment`:
//! - `review_sentiment_id` 主キー
//! - `review_id` UNIQUE（同じ review の再配送は上書き）
//! - `type` / `score` / `ratio` / `analyzed_at`

use async_trait::async_trait;

use crate::domain::{NewReviewSentiment, RecordId, ReviewId, ReviewSentimentRecord, StoreError};

#[async_trait]
pub trait SentimentRepository: Send + Sync {
    /// Insert, or replace the row already stored for the same review.
    async fn upsert(&self, record: NewReviewSentiment) -> Result<RecordId, StoreError>;

    async fn find_by_review_id(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<ReviewSentimentRecord>, StoreError>;
}
