//! sentimate-core
//!
//! Product review sentiment enrichment: a review-submitted hook queues the
//! review, a consumer sends its text to the Twinword sentiment API and stores
//! the (type, score, ratio) result, and a view model reads it back for display.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, review, sentiment, record, outcome, errors）
//! - **ports**: 抽象化レイヤー（SentimentAnalyzer, SentimentRepository, MessagePublisher, ...）
//! - **app**: アプリケーションロジック（hook, consumer, service, lookup, worker_loop, builder）
//! - **impls**: 実装（RapidAPI クライアント、SQLite store、in-memory queue/store）
//! - **config** / **logging**: 設定ファイルと tracing の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod logging;
pub mod ports;

pub use app::{App, AppBuilder};
pub use config::SentimateConfig;
