//! Configuration for the sentiment pipeline, read from a TOML file.
//!
//! ```toml
//! [rapidapi]
//! endpoint = "https://twinword-sentiment-analysis.p.rapidapi.com/analyze/"
//! api_key = "<encrypted key>"
//! timeout_secs = 30
//!
//! [database]
//! path = "sentimate.db"
//!
//! [queue]
//! topic = "macademy.sentimate.reviews"
//! poll_interval_ms = 500
//!
//! [worker]
//! concurrency = 1
//!
//! [retry]
//! max_attempts = 3
//! base_delay_ms = 2000
//! multiplier = 2.0
//! ```
//!
//! Every field has a default. `SENTIMATE_API_KEY` overrides `rapidapi.api_key`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::hook::REVIEWS_TOPIC;
use crate::app::retry::RetryPolicy;
use crate::app::worker_loop::WorkerSettings;
use crate::domain::ConfigError;
use crate::impls::SENTIMENT_ENDPOINT;
use crate::ports::ConfigSource;

pub const API_KEY_ENV: &str = "SENTIMATE_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimateConfig {
    pub rapidapi: RapidApiConfig,
    pub database: DatabaseConfig,
    pub queue: QueueConfig,
    pub worker: WorkerConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RapidApiConfig {
    pub endpoint: String,
    /// Stored encrypted; decrypted through `SecretDecryptor` on each call.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RapidApiConfig {
    fn default() -> Self {
        Self {
            endpoint: SENTIMENT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sentimate.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub topic: String,
    pub poll_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            topic: REVIEWS_TOPIC.to_string(),
            poll_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub concurrency: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            multiplier: policy.multiplier,
        }
    }
}

impl SentimateConfig {
    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::parse(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load `path` if given, otherwise defaults; env overrides apply either way.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or crash the workers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rapidapi.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "rapidapi.timeout_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.queue.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "queue.poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        let multiplier = self.retry.multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(ConfigError::Invalid {
                key: "retry.multiplier",
                reason: format!("must be a finite number >= 1.0, got {multiplier}"),
            });
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.rapidapi.api_key = Some(key);
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.rapidapi.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts.max(1),
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
            multiplier: self.retry.multiplier,
        }
    }

    pub fn worker_settings(&self) -> WorkerSettings {
        WorkerSettings {
            topic: self.queue.topic.clone(),
            concurrency: self.worker.concurrency.max(1),
            poll_interval: Duration::from_millis(self.queue.poll_interval_ms),
            retry: self.retry_policy(),
        }
    }
}

impl ConfigSource for SentimateConfig {
    fn encrypted_api_key(&self) -> Option<String> {
        self.rapidapi.api_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SentimateConfig::parse("").unwrap();
        assert_eq!(config, SentimateConfig::default());
        assert_eq!(config.rapidapi.endpoint, SENTIMENT_ENDPOINT);
        assert_eq!(config.queue.topic, "macademy.sentimate.reviews");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SentimateConfig::parse(
            r#"
            [rapidapi]
            api_key = "abc"

            [worker]
            concurrency = 4

            [retry]
            max_attempts = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.encrypted_api_key().as_deref(), Some("abc"));
        assert_eq!(config.rapidapi.timeout_secs, 30);
        assert_eq!(config.worker_settings().concurrency, 4);
        // zero attempts would drop every message unprocessed
        assert_eq!(config.retry_policy().max_attempts, 1);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = SentimateConfig::parse("[rapidapi\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    #[case::negative_multiplier("[retry]\nmultiplier = -2.0", "retry.multiplier")]
    #[case::shrinking_multiplier("[retry]\nmultiplier = 0.5", "retry.multiplier")]
    #[case::nan_multiplier("[retry]\nmultiplier = nan", "retry.multiplier")]
    #[case::infinite_multiplier("[retry]\nmultiplier = inf", "retry.multiplier")]
    #[case::zero_timeout("[rapidapi]\ntimeout_secs = 0", "rapidapi.timeout_secs")]
    #[case::zero_poll_interval("[queue]\npoll_interval_ms = 0", "queue.poll_interval_ms")]
    fn unusable_values_are_rejected(#[case] content: &str, #[case] expected_key: &str) {
        let err = SentimateConfig::parse(content).unwrap_err();
        match err {
            ConfigError::Invalid { key, .. } => assert_eq!(key, expected_key),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn constant_backoff_multiplier_is_accepted() {
        let config = SentimateConfig::parse("[retry]\nmultiplier = 1.0").unwrap();
        assert_eq!(
            config.retry_policy().next_delay(3),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"/tmp/reviews.db\"").unwrap();

        let config = SentimateConfig::load(file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/reviews.db"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SentimateConfig::load(Path::new("/nonexistent/sentimate.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
