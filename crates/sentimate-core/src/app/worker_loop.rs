//! WorkerGroup - queue topic からメッセージを取り出して consumer に渡す
//!
//! # フロー
//! 1. MessageSource::pop() でメッセージ取得（timeout 付き）
//! 2. ReviewConsumer::process() → ProcessOutcome
//! 3. `ApiUnavailable` なら RetryPolicy に従って待ってから再実行
//! 4. それ以外はログに残して次へ（dead-letter はない）

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::ProcessOutcome;
use crate::ports::MessageSource;

use super::consumer::ReviewConsumer;
use super::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub topic: String,
    pub concurrency: usize,
    pub poll_interval: Duration,
    pub retry: RetryPolicy,
}

/// Worker group handle.
/// - `request_shutdown()` で新しいメッセージの取得を止める
/// - `shutdown_and_join()` で全ワーカーの終了を待てる
pub struct WorkerGroup {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl WorkerGroup {
    /// Spawn `settings.concurrency` workers (at least one).
    pub fn spawn(
        settings: WorkerSettings,
        source: Arc<dyn MessageSource>,
        consumer: Arc<ReviewConsumer>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let settings = Arc::new(settings);

        let n = settings.concurrency.max(1);
        let mut joins = Vec::with_capacity(n);
        for worker_id in 0..n {
            let source = Arc::clone(&source);
            let consumer = Arc::clone(&consumer);
            let settings = Arc::clone(&settings);
            let rx = shutdown_rx.clone();

            let join = tokio::spawn(async move {
                worker_loop(worker_id, &settings, source, consumer, &rx).await;
            });
            joins.push(join);
        }

        Self { shutdown_tx, joins }
    }

    /// Request shutdown for all workers.
    /// In-flight messages finish (including their retries); no new ones are taken.
    /// A worker blocked in `pop` notices the request once that pop returns.
    pub fn request_shutdown(&self) {
        // ignore send error: receivers may already be dropped
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for all workers.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        for j in self.joins {
            if let Err(e) = j.await {
                tracing::error!(error = %e, "worker task panicked");
            }
        }
    }
}

async fn worker_loop(
    worker_id: usize,
    settings: &WorkerSettings,
    source: Arc<dyn MessageSource>,
    consumer: Arc<ReviewConsumer>,
    shutdown_rx: &watch::Receiver<bool>,
) {
    loop {
        // sender が drop されたら group ごと捨てられている
        if *shutdown_rx.borrow() || shutdown_rx.has_changed().is_err() {
            break;
        }

        // pop を途中で捨てると blocking 側が取り出したメッセージを失うので、
        // shutdown は pop と pop の間でだけ見る (最大 poll_interval 遅れる)
        let popped = source.pop(&settings.topic, settings.poll_interval).await;

        let message = match popped {
            Ok(Some(message)) => message,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!(worker_id, error = %e, "failed to pop from queue");
                tokio::time::sleep(settings.poll_interval).await;
                continue;
            }
        };

        let outcome = process_with_retry(&consumer, &message, &settings.retry).await;
        tracing::debug!(worker_id, ?outcome, "processed review message");
    }
}

/// Process one message, retrying transport failures per `policy`.
pub async fn process_with_retry(
    consumer: &ReviewConsumer,
    message: &str,
    policy: &RetryPolicy,
) -> ProcessOutcome {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let outcome = consumer.process(message).await;

        if !outcome.is_retryable() {
            return outcome;
        }
        if !policy.allows_retry(attempts) {
            tracing::error!(attempts, ?outcome, "giving up on review message");
            return outcome;
        }

        let delay = policy.next_delay(attempts);
        tracing::warn!(attempts, delay_ms = delay.as_millis() as u64, "sentiment API unavailable, retrying");
        tokio::time::sleep(delay).await;
    }
}
