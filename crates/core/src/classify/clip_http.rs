//! HTTP client for a remote CLIP-style inference service.
//!
//! The service receives the image (PNG) and the candidate descriptions as a
//! multipart form and answers with either a probability distribution or raw
//! per-image logits, which are softmaxed here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::raster::DecodedImage;
use super::vibe::Scorer;
use super::ScorerError;

/// Inference service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpScorerConfig {
    /// Full URL of the scoring endpoint.
    pub endpoint: String,
    /// Model identifier forwarded to the service.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds. Inference is slow; keep this generous.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "openai/clip-vit-base-patch32".to_string()
}

fn default_timeout() -> u64 {
    120
}

/// Scorer that delegates to a remote inference service.
pub struct HttpScorer {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    #[serde(default)]
    probabilities: Option<Vec<f32>>,
    #[serde(default)]
    logits: Option<Vec<f32>>,
}

impl ScoreResponse {
    fn into_distribution(self) -> Result<Vec<f32>, ScorerError> {
        match (self.probabilities, self.logits) {
            (Some(probabilities), _) => Ok(probabilities),
            (None, Some(logits)) => Ok(softmax(&logits)),
            (None, None) => Err(ScorerError::ParseError(
                "response has neither probabilities nor logits".to_string(),
            )),
        }
    }
}

impl HttpScorer {
    pub fn new(config: HttpScorerConfig) -> Result<Self, ScorerError> {
        if config.endpoint.is_empty() {
            return Err(ScorerError::NotConfigured(
                "scorer endpoint is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    fn name(&self) -> &str {
        "clip-http"
    }

    async fn score(
        &self,
        image: &DecodedImage,
        descriptions: &[&str],
    ) -> Result<Vec<f32>, ScorerError> {
        let png = image.encode_png()?;
        let labels = serde_json::to_string(descriptions)
            .map_err(|e| ScorerError::ParseError(format!("Failed to encode labels: {}", e)))?;

        debug!(
            "Scoring {}x{} image against {} descriptions with {}",
            image.width(),
            image.height(),
            descriptions.len(),
            self.model
        );

        let form = Form::new()
            .part(
                "image",
                Part::bytes(png)
                    .file_name("image.png")
                    .mime_str("image/png")?,
            )
            .text("labels", labels)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScorerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: ScoreResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::ParseError(e.to_string()))?;

        body.into_distribution()
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }

    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[2.0, 1.0, 0.1]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probs[0] > probs[1] && probs[1] > probs[2]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        // CLIP logits are scaled by ~100, which overflows a naive exp.
        let probs = softmax(&[2500.0, 2499.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs[0] - 0.7310586).abs() < 1e-5);
    }

    #[test]
    fn test_softmax_equal_logits() {
        assert_eq!(softmax(&[3.0, 3.0]), vec![0.5, 0.5]);
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_response_prefers_probabilities() {
        let body: ScoreResponse =
            serde_json::from_str(r#"{"probabilities": [0.7, 0.3], "logits": [0.0, 5.0]}"#)
                .unwrap();
        assert_eq!(body.into_distribution().unwrap(), vec![0.7, 0.3]);
    }

    #[test]
    fn test_response_from_logits() {
        let body: ScoreResponse = serde_json::from_str(r#"{"logits": [1.0, 1.0]}"#).unwrap();
        assert_eq!(body.into_distribution().unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_response_empty_is_parse_error() {
        let body: ScoreResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            body.into_distribution(),
            Err(ScorerError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_endpoint() {
        let result = HttpScorer::new(HttpScorerConfig {
            endpoint: String::new(),
            model: default_model(),
            timeout_secs: 5,
        });
        assert!(matches!(result, Err(ScorerError::NotConfigured(_))));
    }

    #[test]
    fn test_default_model_from_config() {
        let config: HttpScorerConfig =
            toml::from_str(r#"endpoint = "http://127.0.0.1:9000/score""#).unwrap();
        let scorer = HttpScorer::new(config).unwrap();
        assert_eq!(scorer.model(), "openai/clip-vit-base-patch32");
        assert_eq!(scorer.name(), "clip-http");
    }
}
