//! AddReviewToQueue - review 保存イベントの observer
//!
//! 新規作成された review だけを、フィールド全体の JSON として topic に publish します。

use std::sync::Arc;

use crate::domain::{HookOutcome, Review, SentimateError};
use crate::ports::MessagePublisher;

pub const REVIEWS_TOPIC: &str = "macademy.sentimate.reviews";

pub struct AddReviewToQueue {
    publisher: Arc<dyn MessagePublisher>,
    topic: String,
}

impl AddReviewToQueue {
    pub fn new(publisher: Arc<dyn MessagePublisher>) -> Self {
        Self::with_topic(publisher, REVIEWS_TOPIC)
    }

    pub fn with_topic(publisher: Arc<dyn MessagePublisher>, topic: impl Into<String>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
        }
    }

    pub async fn execute(&self, review: &Review) -> Result<HookOutcome, SentimateError> {
        if !review.is_new() {
            return Ok(HookOutcome::Skipped);
        }

        let body = serde_json::to_string(review.data())?;
        self.publisher.publish(&self.topic, body).await?;

        tracing::debug!(
            topic = %self.topic,
            review_id = ?review.data().get("review_id"),
            "queued review for sentiment analysis"
        );
        Ok(HookOutcome::Published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryMessageQueue;
    use crate::ports::MessageSource;
    use serde_json::{Map, Value, json};
    use std::time::Duration;

    fn fields() -> Map<String, Value> {
        match json!({"review_id": "42", "title": "Great", "detail": "Loved it", "nickname": "amy"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn new_review_is_published_with_all_fields() {
        let queue = Arc::new(InMemoryMessageQueue::new());
        let hook = AddReviewToQueue::new(queue.clone());

        let outcome = hook.execute(&Review::new(fields(), true)).await.unwrap();
        assert_eq!(outcome, HookOutcome::Published);

        let body = queue
            .pop(REVIEWS_TOPIC, Duration::from_secs(1))
            .await
            .unwrap()
            .unwrap();
        let published: Map<String, Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(published, fields());
    }

    #[tokio::test]
    async fn updated_review_is_never_published() {
        let queue = Arc::new(InMemoryMessageQueue::new());
        let hook = AddReviewToQueue::new(queue.clone());

        let outcome = hook.execute(&Review::new(fields(), false)).await.unwrap();
        assert_eq!(outcome, HookOutcome::Skipped);
        assert!(queue.is_empty(REVIEWS_TOPIC).unwrap());
    }
}
