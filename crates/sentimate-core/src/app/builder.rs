//! AppBuilder - パイプラインの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 必要な port（analyzer, repository, publisher, source）が揃っていなければ
//!   build() 時に BuildError を返す
//! - `from_config()` は本番用の実装（RapidAPI + SQLite + in-memory queue）で埋める

use std::sync::Arc;

use crate::config::SentimateConfig;
use crate::domain::SentimateError;
use crate::impls::{InMemoryMessageQueue, RapidApiSentimentClient, SqliteSentimentStore};
use crate::ports::{
    Clock, MessagePublisher, MessageSource, PlainTextDecryptor, SecretDecryptor,
    SentimentAnalyzer, SentimentRepository, SystemClock,
};

use super::consumer::ReviewConsumer;
use super::hook::AddReviewToQueue;
use super::lookup::SentimentViewModel;
use super::service::ReviewSentimentService;
use super::worker_loop::{WorkerGroup, WorkerSettings};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .analyzer(analyzer)
///     .repository(store)
///     .queue(queue)
///     .build()?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    analyzer: Option<Arc<dyn SentimentAnalyzer>>,
    repository: Option<Arc<dyn SentimentRepository>>,
    publisher: Option<Arc<dyn MessagePublisher>>,
    source: Option<Arc<dyn MessageSource>>,
    clock: Option<Arc<dyn Clock>>,
    settings: Option<WorkerSettings>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing components: {0:?}. These ports must be provided before build().")]
    MissingComponents(Vec<&'static str>),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定ファイルから本番用の実装で埋めた builder を作る
    pub fn from_config(
        config: &SentimateConfig,
        decryptor: Arc<dyn SecretDecryptor>,
    ) -> Result<Self, SentimateError> {
        let analyzer = RapidApiSentimentClient::new(
            config.rapidapi.endpoint.clone(),
            config.timeout(),
            Arc::new(config.clone()),
            decryptor,
        )?;
        let store = SqliteSentimentStore::open(&config.database.path)?;
        let queue = Arc::new(InMemoryMessageQueue::new());

        Ok(Self::new()
            .analyzer(Arc::new(analyzer))
            .repository(Arc::new(store))
            .queue(queue)
            .settings(config.worker_settings()))
    }

    /// `from_config` with the plain-text decryptor.
    pub fn from_config_plaintext(config: &SentimateConfig) -> Result<Self, SentimateError> {
        Self::from_config(config, Arc::new(PlainTextDecryptor))
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn SentimentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn MessagePublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn source(mut self, source: Arc<dyn MessageSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// 同じキューを publisher と source の両方に使う
    pub fn queue<Q>(self, queue: Arc<Q>) -> Self
    where
        Q: MessagePublisher + MessageSource + 'static,
    {
        self.publisher(queue.clone()).source(queue)
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn settings(mut self, settings: WorkerSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let mut missing = Vec::new();
        if self.analyzer.is_none() {
            missing.push("analyzer");
        }
        if self.repository.is_none() {
            missing.push("repository");
        }
        if self.publisher.is_none() {
            missing.push("publisher");
        }
        if self.source.is_none() {
            missing.push("source");
        }

        let (Some(analyzer), Some(repository), Some(publisher), Some(source)) =
            (self.analyzer, self.repository, self.publisher, self.source)
        else {
            return Err(BuildError::MissingComponents(missing));
        };

        let settings = self
            .settings
            .unwrap_or_else(|| SentimateConfig::default().worker_settings());
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let service = Arc::new(ReviewSentimentService::new(repository));
        let consumer = Arc::new(ReviewConsumer::new(analyzer, service.clone(), clock));
        let hook = AddReviewToQueue::with_topic(publisher, settings.topic.clone());
        let view_model = SentimentViewModel::new(service.clone());

        Ok(App {
            hook,
            consumer,
            service,
            view_model,
            source,
            settings,
        })
    }
}

/// App は組み立て済みのパイプライン
pub struct App {
    pub hook: AddReviewToQueue,
    pub consumer: Arc<ReviewConsumer>,
    pub service: Arc<ReviewSentimentService>,
    pub view_model: SentimentViewModel,
    source: Arc<dyn MessageSource>,
    settings: WorkerSettings,
}

impl App {
    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    /// Start consuming the review topic.
    pub fn spawn_workers(&self) -> WorkerGroup {
        WorkerGroup::spawn(
            self.settings.clone(),
            Arc::clone(&self.source),
            Arc::clone(&self.consumer),
        )
    }
}
