use serde::{Deserialize, Serialize};

use crate::catalog::{CatApiConfig, FetcherConfig};
use crate::classify::HttpScorerConfig;
use crate::notify::NotifyConfig;
use crate::storage::OciStorageConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatApiConfig,
    pub scorer: HttpScorerConfig,
    pub storage: OciStorageConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: SanitizedCatalogConfig,
    pub scorer: HttpScorerConfig,
    pub storage: SanitizedStorageConfig,
    pub notify: SanitizedNotifyConfig,
    pub fetcher: FetcherConfig,
    pub logging: LoggingConfig,
}

/// Catalog config with the API key hidden
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub limit: u32,
    pub timeout_secs: u64,
}

/// Storage config with the pre-authenticated endpoint hidden
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedStorageConfig {
    pub endpoint_configured: bool,
    pub namespace: String,
    pub bucket: String,
    pub timeout_secs: u64,
}

/// Notification config reduced to which channels are usable
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedNotifyConfig {
    pub webhook_configured: bool,
    pub telegram_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                api_key_configured: !config.catalog.api_key.is_empty(),
                limit: config.catalog.limit,
                timeout_secs: config.catalog.timeout_secs,
            },
            scorer: config.scorer.clone(),
            storage: SanitizedStorageConfig {
                endpoint_configured: !config.storage.endpoint.is_empty(),
                namespace: config.storage.namespace.clone(),
                bucket: config.storage.bucket.clone(),
                timeout_secs: config.storage.timeout_secs,
            },
            notify: SanitizedNotifyConfig {
                webhook_configured: config.notify.webhook().is_some(),
                telegram_configured: config.notify.telegram().is_some(),
                timeout_secs: config.notify.timeout_secs,
            },
            fetcher: config.fetcher.clone(),
            logging: config.logging.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[catalog]
api_key = "cat-key"

[scorer]
endpoint = "http://localhost:9000/score"

[storage]
endpoint = "https://objectstorage.eu-frankfurt-1.oraclecloud.com/p/token"
namespace = "tenancy"
"#;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.catalog.api_key, "cat-key");
        assert_eq!(config.catalog.limit, 10);
        assert_eq!(config.catalog.base_url, "https://api.thecatapi.com");
        assert_eq!(config.storage.bucket, "bucket-cats");
        assert_eq!(config.scorer.model, "openai/clip-vit-base-patch32");
        assert!(config.notify.webhook().is_none());
        assert!(config.notify.telegram().is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_deserialize_missing_storage_fails() {
        let toml = r#"
[catalog]
api_key = "cat-key"

[scorer]
endpoint = "http://localhost:9000/score"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_json_logging() {
        let toml = format!("{}\n[logging]\nformat = \"json\"\n", MINIMAL);
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let toml = format!(
            "{}\n[notify]\nwebhook_url = \"https://discord.example/api/webhooks/1/secret\"\n",
            MINIMAL
        );
        let config: Config = toml::from_str(&toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);

        assert!(sanitized.catalog.api_key_configured);
        assert!(sanitized.storage.endpoint_configured);
        assert!(sanitized.notify.webhook_configured);
        assert!(!sanitized.notify.telegram_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("cat-key"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("/p/token"));
    }
}
