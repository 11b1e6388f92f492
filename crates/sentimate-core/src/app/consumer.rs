//! ReviewConsumer - queue consumer（パイプライン本体）
//!
//! # フロー
//! 1. メッセージを 1 回だけパースして title / detail / review_id を取り出す
//! 2. SentimentAnalyzer に `"{title}: {detail}"` を送る
//! 3. 結果が無効なら何も書かない
//! 4. 有効なら `{review_id, type, score, ratio}` を保存
//!
//! どの失敗もここで吸収してログに残し、`ProcessOutcome` で返す。

use std::sync::Arc;

use crate::domain::{
    NewReviewSentiment, ProcessOutcome, ReviewMessage, SaveOutcome, SentimentResult,
    describe_values, is_valid_sentiment,
};
use crate::ports::{Clock, SentimentAnalyzer};

use super::service::ReviewSentimentService;

pub struct ReviewConsumer {
    analyzer: Arc<dyn SentimentAnalyzer>,
    service: Arc<ReviewSentimentService>,
    clock: Arc<dyn Clock>,
}

impl ReviewConsumer {
    pub fn new(
        analyzer: Arc<dyn SentimentAnalyzer>,
        service: Arc<ReviewSentimentService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            analyzer,
            service,
            clock,
        }
    }

    /// Queue consumer process handler.
    pub async fn process(&self, message: &str) -> ProcessOutcome {
        // パースに失敗しても空テキストで続行する
        let (text, review_id) = match ReviewMessage::parse(message) {
            Ok(parsed) => (parsed.analysis_text(), parsed.review_id),
            Err(e) => {
                tracing::error!(error = %e, "Failed to deserialize queued review message");
                (String::new(), None)
            }
        };

        let raw = match self.analyzer.analyze(&text).await {
            Ok(raw) => raw,
            Err(e) => return ProcessOutcome::ApiUnavailable(e.to_string()),
        };

        let Some(sentiment) = SentimentResult::from_raw(&raw) else {
            if is_valid_sentiment(&raw) {
                // analyzer はキーが揃っていれば通すので、数値でない値はここでしか気づけない
                tracing::error!(
                    response = %describe_values(&raw),
                    "sentiment score/ratio is not a finite number; sentiment not stored"
                );
            } else {
                tracing::debug!(response = %describe_values(&raw), "discarding incomplete sentiment result");
            }
            return ProcessOutcome::InvalidResult;
        };

        let Some(review_id) = review_id else {
            tracing::error!(
                sentiment = %sentiment.kind,
                "queued review message has no review_id; sentiment not stored"
            );
            return ProcessOutcome::MissingReviewId;
        };

        let record = NewReviewSentiment::new(review_id, sentiment, self.clock.now());
        match self.service.save(record).await {
            SaveOutcome::Saved(id) => {
                tracing::info!(%review_id, record_id = %id, "stored review sentiment");
                ProcessOutcome::Stored(id)
            }
            SaveOutcome::Failed(reason) => ProcessOutcome::SaveFailed(reason),
        }
    }
}
