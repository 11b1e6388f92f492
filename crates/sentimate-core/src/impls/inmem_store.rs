//! InMemorySentimentStore - テスト・ローカル実行用の SentimentRepository
//!
//! review_id ごとに 1 件だけ保持する（SQLite 側の UNIQUE 制約と同じ振る舞い）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{NewReviewSentiment, RecordId, ReviewId, ReviewSentimentRecord, StoreError};
use crate::ports::SentimentRepository;

struct State {
    by_review: HashMap<ReviewId, ReviewSentimentRecord>,
    next_id: i64,
}

pub struct InMemorySentimentStore {
    state: Mutex<State>,
}

impl InMemorySentimentStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                by_review: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 保存済みレコードのスナップショット（review_id 順）
    pub async fn records(&self) -> Vec<ReviewSentimentRecord> {
        let state = self.state.lock().await;
        let mut records: Vec<_> = state.by_review.values().cloned().collect();
        records.sort_by_key(|r| r.review_id);
        records
    }
}

impl Default for InMemorySentimentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentRepository for InMemorySentimentStore {
    async fn upsert(&self, record: NewReviewSentiment) -> Result<RecordId, StoreError> {
        let mut state = self.state.lock().await;

        let id = match state.by_review.get(&record.review_id) {
            Some(existing) => existing.id,
            None => {
                let id = RecordId::new(state.next_id);
                state.next_id += 1;
                id
            }
        };

        state
            .by_review
            .insert(record.review_id, ReviewSentimentRecord::from_new(id, record));
        Ok(id)
    }

    async fn find_by_review_id(
        &self,
        review_id: ReviewId,
    ) -> Result<Option<ReviewSentimentRecord>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.by_review.get(&review_id).cloned())
    }
}
