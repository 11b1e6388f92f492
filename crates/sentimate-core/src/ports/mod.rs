//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! ホスト側プラットフォームが持つサービス（永続化、メッセージキュー、
//! 設定、暗号化）と外部 API をすべて trait で受け取り、
//! パイプライン本体をライブ環境なしでテストできるようにします。

pub mod clock;
pub mod message_queue;
pub mod secrets;
pub mod sentiment_analyzer;
pub mod sentiment_repository;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, SystemClock};
#[cfg(test)]
pub use self::clock::FixedClock;
pub use self::message_queue::{MessagePublisher, MessageSource, QueueError};
pub use self::secrets::{ConfigSource, PlainTextDecryptor, SecretDecryptor, resolve_api_key};
pub use self::sentiment_analyzer::SentimentAnalyzer;
pub use self::sentiment_repository::SentimentRepository;
