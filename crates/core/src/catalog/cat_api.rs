//! TheCatAPI search client.
//!
//! Requires an API key sent in the `x-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::CatalogItem;
use super::{CatalogError, ImageSource};

/// TheCatAPI client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatApiConfig {
    /// API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.thecatapi.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum number of images per run.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.thecatapi.com".to_string()
}

fn default_limit() -> u32 {
    10
}

fn default_timeout() -> u64 {
    30
}

/// Image source backed by TheCatAPI's random search endpoint.
pub struct CatApiSource {
    client: Client,
    base_url: String,
    api_key: String,
    limit: u32,
}

impl CatApiSource {
    /// Create a new client.
    pub fn new(config: CatApiConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "Cat API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            limit: config.limit,
        })
    }

    /// Maximum batch size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Fetch a batch, keeping the failure cause.
    pub async fn try_fetch_batch(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = format!("{}/v1/images/search", self.base_url);

        debug!("Cat API search: limit={}", self.limit);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[("limit", self.limit)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        // Entries are parsed one by one so a single bad entry only fails itself
        let entries: Vec<Value> = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse image search response: {}", e))
        })?;

        let items: Vec<CatalogItem> = entries
            .iter()
            .take(self.limit as usize)
            .enumerate()
            .map(|(index, entry)| CatalogItem::from_entry(index, entry))
            .collect();

        let defective = items.iter().filter(|i| i.is_defective()).count();
        if defective > 0 {
            warn!("{} catalog entries are malformed", defective);
        }

        Ok(items)
    }
}

#[async_trait]
impl ImageSource for CatApiSource {
    fn name(&self) -> &str {
        "thecatapi"
    }

    async fn fetch_batch(&self) -> Vec<CatalogItem> {
        match self.try_fetch_batch().await {
            Ok(items) => {
                info!("Fetched {} candidate images", items.len());
                items
            }
            Err(e) => {
                warn!("Catalog fetch failed, continuing with an empty batch: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> CatApiConfig {
        CatApiConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            limit: default_limit(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_missing_api_key() {
        let mut cfg = config("https://api.thecatapi.com");
        cfg.api_key = String::new();
        let result = CatApiSource::new(cfg);
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = CatApiSource::new(config("https://api.thecatapi.com/")).unwrap();
        assert_eq!(source.base_url, "https://api.thecatapi.com");
        assert_eq!(source.limit(), 10);
    }

    #[test]
    fn test_deserialize_config_defaults() {
        let cfg: CatApiConfig = toml::from_str(r#"api_key = "k""#).unwrap();
        assert_eq!(cfg.base_url, "https://api.thecatapi.com");
        assert_eq!(cfg.limit, 10);
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_unreachable_catalog_yields_empty_batch() {
        // Port 1 on loopback refuses connections immediately.
        let source = CatApiSource::new(config("http://127.0.0.1:1")).unwrap();

        assert!(source.try_fetch_batch().await.is_err());
        assert!(source.fetch_batch().await.is_empty());
    }
}
