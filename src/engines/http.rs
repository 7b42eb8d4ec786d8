use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::EngineConfig;
use crate::engines::{QualityEstimator, TranslationEngine};
use crate::errors::EngineError;
use crate::factors::ResolvedFactors;

/// Translation request for the model server
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    /// Sentences to translate
    pub sentences: &'a [String],
    /// Factors conditioning the output
    pub factors: &'a ResolvedFactors,
}

/// Translation response from the model server
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    /// One translation per sentence
    pub translations: Vec<String>,
}

/// One pair to score
#[derive(Debug, Serialize)]
pub struct ScorePair<'a> {
    /// Source sentence
    pub source: &'a str,
    /// Translated sentence
    pub translation: &'a str,
}

/// Scoring request for the QE server
#[derive(Debug, Serialize)]
pub struct ScoreRequest<'a> {
    /// Pairs to score
    pub pairs: Vec<ScorePair<'a>>,
}

/// Scoring response from the QE server
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// One score per pair
    pub scores: Vec<f64>,
}

/// Client for a translation model server
#[derive(Debug, Clone)]
pub struct HttpEngine {
    /// Base URL of the model server
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl HttpEngine {
    /// Create a new client for the configured endpoint
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: build_client(config.timeout_secs),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranslationEngine for HttpEngine {
    async fn translate(&self, sentences: &[String], factors: &ResolvedFactors) -> Result<Vec<String>, EngineError> {
        let url = format!("{}/translate", self.endpoint);
        let request = TranslateRequest { sentences, factors };

        let response: TranslateResponse = post_json(&self.client, &url, &request).await?;
        Ok(response.translations)
    }
}

/// Client for a quality estimation model server
#[derive(Debug, Clone)]
pub struct HttpQualityEstimator {
    /// Base URL of the QE server
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl HttpQualityEstimator {
    /// Create a new client for the configured endpoint
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: build_client(config.timeout_secs),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QualityEstimator for HttpQualityEstimator {
    async fn score(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, EngineError> {
        let url = format!("{}/score", self.endpoint);
        let request = ScoreRequest {
            pairs: pairs.iter()
                .map(|(source, translation)| ScorePair { source: source.as_str(), translation: translation.as_str() })
                .collect(),
        };

        let response: ScoreResponse = post_json(&self.client, &url, &request).await?;
        Ok(response.scores)
    }
}

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

async fn post_json<B, R>(client: &Client, url: &str, body: &B) -> Result<R, EngineError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client.post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| EngineError::RequestFailed(format!("Failed to send request to {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("Model server error ({}): {}", status, error_text);
        return Err(EngineError::ApiError {
            status_code: status.as_u16(),
            message: error_text,
        });
    }

    response.json::<R>().await
        .map_err(|e| EngineError::ParseError(format!("Failed to parse response from {}: {}", url, e)))
}
