//! Errors - エラー型と分類
//!
//! 書き込み経路の失敗はすべてログに残して吸収し、Outcome で呼び出し元に伝えます。
//! 読み込み経路の `StoreError::NotFound` だけが呼び出し元まで上がる想定です。

use thiserror::Error;

use super::ids::ReviewId;

/// Sentiment API 呼び出しの失敗
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned an error: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned a non-object body: {body}")]
    UnexpectedBody { endpoint: String, body: String },

    #[error("invalid sentiment endpoint {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Store の失敗
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("the review sentiment with {0} review ID does not exist")]
    NotFound(ReviewId),

    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Message queue の失敗
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue operation failed: {0}")]
    OperationFailed(String),
}

/// 設定・秘密情報の失敗
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("setting {0} is not configured")]
    Missing(&'static str),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// `SecretDecryptor` の実装側 (ホストの鍵管理など) が返す。
    /// 同梱の `PlainTextDecryptor` は失敗しない。
    #[error("failed to decrypt secret: {0}")]
    Decrypt(String),
}

/// SentimateError はパイプライン全体のエラー
#[derive(Debug, Error)]
pub enum SentimateError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize review: {0}")]
    Serialize(#[from] serde_json::Error),
}
