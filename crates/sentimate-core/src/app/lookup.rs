//! SentimentViewModel - 表示用の sentiment 取得（read path）

use std::sync::Arc;

use crate::domain::{ReviewId, StoreError};

use super::service::ReviewSentimentService;

pub struct SentimentViewModel {
    service: Arc<ReviewSentimentService>,
}

impl SentimentViewModel {
    pub fn new(service: Arc<ReviewSentimentService>) -> Self {
        Self { service }
    }

    /// Requested field of the review's sentiment, first letter upper-cased.
    ///
    /// `None` when the sentiment has not been computed (yet), or when the key
    /// is missing or unknown.
    pub async fn get_data_by_review_id(&self, review_id: ReviewId, key: Option<&str>) -> Option<String> {
        let key = key?;
        match self.service.get_by_review_id(review_id).await {
            Ok(record) => record.field(key).map(|value| upper_first(&value)),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => {
                tracing::warn!(%review_id, error = %e, "failed to load review sentiment");
                None
            }
        }
    }
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
