//! SentimentAnalyzer port - 外部 sentiment API

use async_trait::async_trait;

use crate::domain::{ApiError, RawSentiment};

/// Text を送って生の判定結果を受け取る
///
/// 実装は 1 回だけリクエストを送り、リトライしない。
/// 返ってきた `RawSentiment` が有効かどうかは呼び出し側が
/// `is_valid_sentiment` で確認する。
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<RawSentiment, ApiError>;
}
