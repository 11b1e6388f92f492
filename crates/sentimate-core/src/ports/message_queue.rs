//! Message queue ports - ホスト側のメッセージブローカー
//!
//! Review-submitted hook は `MessagePublisher` に publish し、
//! worker は `MessageSource` から pop します。
//! メッセージ本文はシリアライズ済みの文字列のみ（構造は consumer 側で解釈）。

use std::time::Duration;

use async_trait::async_trait;

pub use crate::domain::errors::QueueError;

/// Topic へのメッセージ送信
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, topic: &str, body: String) -> Result<(), QueueError>;
}

/// Topic からのメッセージ受信
///
/// # 設計原則
/// - at-least-once、順序保証なし
/// - blocking pop（timeout 付き）。timeout で `Ok(None)`
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn pop(&self, topic: &str, timeout: Duration) -> Result<Option<String>, QueueError>;
}
