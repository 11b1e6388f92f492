//! InMemoryMessageQueue - 開発用のメッセージキュー
//!
//! # 実装詳細
//! - Mutex + Condvar による blocking pop
//! - spawn_blocking で同期処理を async から呼ぶ
//! - topic ごとに VecDeque<String> を管理

use crate::ports::{MessagePublisher, MessageSource, QueueError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// InMemoryMessageQueue は開発用のメッセージキュー
///
/// `MessagePublisher` と `MessageSource` の両方を実装するので、
/// hook と worker を同じプロセス内でつなげられる。
///
/// # 使用例
/// ```ignore
/// let queue = InMemoryMessageQueue::new();
/// queue.publish("macademy.sentimate.reviews", body).await?;
/// let msg = queue.pop("macademy.sentimate.reviews", Duration::from_secs(5)).await?;
/// ```
pub struct InMemoryMessageQueue {
    /// topic ごとのキュー
    topics: Arc<Mutex<HashMap<String, VecDeque<String>>>>,
    /// publish 時の通知用
    condvar: Arc<Condvar>,
}

impl InMemoryMessageQueue {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            condvar: Arc::new(Condvar::new()),
        }
    }

    /// topic に溜まっているメッセージ数
    pub fn len(&self, topic: &str) -> Result<usize, QueueError> {
        let topics = self
            .topics
            .lock()
            .map_err(|e| QueueError::OperationFailed(format!("lock poisoned: {e}")))?;
        Ok(topics.get(topic).map_or(0, VecDeque::len))
    }

    pub fn is_empty(&self, topic: &str) -> Result<bool, QueueError> {
        Ok(self.len(topic)? == 0)
    }
}

impl Default for InMemoryMessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MessagePublisher for InMemoryMessageQueue {
    async fn publish(&self, topic: &str, body: String) -> Result<(), QueueError> {
        let topics = self.topics.clone();
        let condvar = self.condvar.clone();
        let topic = topic.to_string();

        tokio::task::spawn_blocking(move || -> Result<_, QueueError> {
            let mut topics = topics
                .lock()
                .map_err(|e| QueueError::OperationFailed(format!("lock poisoned: {e}")))?;
            topics.entry(topic).or_default().push_back(body);

            // 別 topic を待っているスレッドもいるので全員起こす
            condvar.notify_all();
            Ok(())
        })
        .await
        .map_err(|e| QueueError::OperationFailed(format!("Publish failed: {e}")))?
    }
}

#[async_trait::async_trait]
impl MessageSource for InMemoryMessageQueue {
    async fn pop(&self, topic: &str, timeout: Duration) -> Result<Option<String>, QueueError> {
        let topics = self.topics.clone();
        let condvar = self.condvar.clone();
        let topic = topic.to_string();
        tokio::task::spawn_blocking(move || -> Result<_, QueueError> {
            let start = std::time::Instant::now();
            let mut guard = topics
                .lock()
                .map_err(|e| QueueError::OperationFailed(format!("lock poisoned: {e}")))?;
            loop {
                if let Some(queue) = guard.get_mut(&topic)
                    && let Some(body) = queue.pop_front()
                {
                    return Ok(Some(body));
                }
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Ok(None);
                }
                let remaining = timeout.saturating_sub(elapsed);
                let (new_guard, _) = condvar
                    .wait_timeout(guard, remaining)
                    .map_err(|e| QueueError::OperationFailed(format!("lock poisoned: {e}")))?;
                guard = new_guard;
            }
        })
        .await
        .map_err(|e| QueueError::OperationFailed(format!("Pop failed: {e}")))?
    }
}
