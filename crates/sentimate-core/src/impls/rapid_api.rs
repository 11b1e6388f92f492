//! RapidApiSentimentClient - Twinword sentiment API (RapidAPI 経由) の呼び出し
//!
//! 1 回の POST だけを行い、リトライはしない。失敗はログに残して
//! `ApiError` として返す（パニックしない）。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::domain::{ApiError, RawSentiment, describe_values, is_valid_sentiment};
use crate::ports::{ConfigSource, SecretDecryptor, SentimentAnalyzer, resolve_api_key};

pub const SENTIMENT_ENDPOINT: &str = "https://twinword-sentiment-analysis.p.rapidapi.com/analyze/";

pub struct RapidApiSentimentClient {
    http: reqwest::Client,
    endpoint: String,
    config: Arc<dyn ConfigSource>,
    decryptor: Arc<dyn SecretDecryptor>,
}

impl RapidApiSentimentClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        config: Arc<dyn ConfigSource>,
        decryptor: Arc<dyn SecretDecryptor>,
    ) -> Result<Self, ApiError> {
        let endpoint = endpoint.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint,
            config,
            decryptor,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call_api(&self, form: &[(&str, &str)]) -> Result<RawSentiment, ApiError> {
        let api_key = resolve_api_key(self.config.as_ref(), self.decryptor.as_ref())?;
        let api_host = api_host(&self.endpoint)?;

        let transport = |e: reqwest::Error| ApiError::Transport {
            endpoint: self.endpoint.clone(),
            message: e.to_string(),
        };

        let body: serde_json::Value = self
            .http
            .post(&self.endpoint)
            .header("X-RapidAPI-Host", api_host)
            .header("X-RapidAPI-Key", api_key)
            .header("content-type", "application/x-www-form-urlencoded")
            .form(form)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        match body {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(ApiError::UnexpectedBody {
                endpoint: self.endpoint.clone(),
                body: other.to_string(),
            }),
        }
    }
}

/// Host part of the endpoint, sent back as `X-RapidAPI-Host`.
fn api_host(endpoint: &str) -> Result<String, ApiError> {
    let url = Url::parse(endpoint).map_err(|_| ApiError::InvalidEndpoint(endpoint.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::InvalidEndpoint(endpoint.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[async_trait]
impl SentimentAnalyzer for RapidApiSentimentClient {
    async fn analyze(&self, text: &str) -> Result<RawSentiment, ApiError> {
        let result = self.call_api(&[("text", text)]).await;

        match &result {
            Ok(raw) if !is_valid_sentiment(raw) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    response = %describe_values(raw),
                    "Sentiment Analysis API did not return expected results"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(endpoint = %self.endpoint, error = %e, "sentiment API call failed");
            }
        }

        result
    }
}
