//! Persisted review sentiment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{RecordId, ReviewId};
use super::sentiment::SentimentResult;

/// A sentiment result not yet written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReviewSentiment {
    pub review_id: ReviewId,
    pub sentiment: SentimentResult,
    pub analyzed_at: DateTime<Utc>,
}

impl NewReviewSentiment {
    pub fn new(review_id: ReviewId, sentiment: SentimentResult, analyzed_at: DateTime<Utc>) -> Self {
        Self {
            review_id,
            sentiment,
            analyzed_at,
        }
    }
}

/// The stored association between a review and its sentiment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSentimentRecord {
    pub id: RecordId,
    pub review_id: ReviewId,
    pub sentiment: SentimentResult,
    pub analyzed_at: DateTime<Utc>,
}

impl ReviewSentimentRecord {
    pub fn from_new(id: RecordId, new: NewReviewSentiment) -> Self {
        Self {
            id,
            review_id: new.review_id,
            sentiment: new.sentiment,
            analyzed_at: new.analyzed_at,
        }
    }

    /// Look a field up by its column name, stringified for display.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "review_sentiment_id" | "id" => Some(self.id.to_string()),
            "review_id" => Some(self.review_id.to_string()),
            "type" => Some(self.sentiment.kind.clone()),
            "score" => Some(self.sentiment.score.to_string()),
            "ratio" => Some(self.sentiment.ratio.to_string()),
            "analyzed_at" => Some(self.analyzed_at.to_rfc3339()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> ReviewSentimentRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        ReviewSentimentRecord::from_new(
            RecordId::new(3),
            NewReviewSentiment::new(ReviewId::new(42), SentimentResult::new("positive", 0.9, 0.8), at),
        )
    }

    #[test]
    fn field_lookup_by_column_name() {
        let r = record();
        assert_eq!(r.field("type").as_deref(), Some("positive"));
        assert_eq!(r.field("score").as_deref(), Some("0.9"));
        assert_eq!(r.field("ratio").as_deref(), Some("0.8"));
        assert_eq!(r.field("review_id").as_deref(), Some("42"));
        assert_eq!(r.field("review_sentiment_id").as_deref(), Some("3"));
        assert_eq!(r.field("nope"), None);
    }
}
