//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **RapidApiSentimentClient**: Twinword sentiment API（本番用）
//! - **SqliteSentimentStore**: SQLite の sentiment テーブル（本番用）
//! - **InMemorySentimentStore**: テスト用の store
//! - **InMemoryMessageQueue**: 開発用のメッセージキュー

pub mod inmem_queue;
pub mod inmem_store;
pub mod rapid_api;
pub mod sqlite_store;

// 主要な型を再エクスポート
pub use self::inmem_queue::InMemoryMessageQueue;
pub use self::inmem_store::InMemorySentimentStore;
pub use self::rapid_api::{RapidApiSentimentClient, SENTIMENT_ENDPOINT};
pub use self::sqlite_store::SqliteSentimentStore;
