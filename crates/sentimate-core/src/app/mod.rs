//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてパイプラインを実装します。
//!
//! # 主要コンポーネント
//! - **AddReviewToQueue**: 新規 review を topic に publish する hook
//! - **ReviewConsumer**: メッセージ→API→保存（パイプライン本体）
//! - **ReviewSentimentService**: 保存（失敗は吸収）と取得（NotFound を返す）
//! - **SentimentViewModel**: 表示用の取得（read path）
//! - **WorkerGroup**: topic を消費するループ + リトライ
//! - **AppBuilder**: ワイヤリング

pub mod builder;
pub mod consumer;
pub mod hook;
pub mod lookup;
pub mod retry;
pub mod service;
pub mod worker_loop;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::consumer::ReviewConsumer;
pub use self::hook::{AddReviewToQueue, REVIEWS_TOPIC};
pub use self::lookup::SentimentViewModel;
pub use self::retry::RetryPolicy;
pub use self::service::ReviewSentimentService;
pub use self::worker_loop::{WorkerGroup, WorkerSettings, process_with_retry};
