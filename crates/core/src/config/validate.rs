use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog API key is set and the batch limit is not 0
/// - Scorer and storage endpoints are set
/// - Storage namespace and bucket are set
/// - No network timeout is 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.api_key cannot be empty".to_string(),
        ));
    }
    if config.catalog.limit == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.limit cannot be 0".to_string(),
        ));
    }

    if config.scorer.endpoint.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "scorer.endpoint cannot be empty".to_string(),
        ));
    }

    for (field, value) in [
        ("storage.endpoint", &config.storage.endpoint),
        ("storage.namespace", &config.storage.namespace),
        ("storage.bucket", &config.storage.bucket),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
    }

    for (field, secs) in [
        ("catalog.timeout_secs", config.catalog.timeout_secs),
        ("scorer.timeout_secs", config.scorer.timeout_secs),
        ("storage.timeout_secs", config.storage.timeout_secs),
        ("notify.timeout_secs", config.notify.timeout_secs),
        ("fetcher.timeout_secs", config.fetcher.timeout_secs),
    ] {
        if secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be 0",
                field
            )));
        }
    }

    Ok(())
}
