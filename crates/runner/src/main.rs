use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use segregator_core::{
    load_config, validate_config, Config, LogFormat, RunOrchestrator, SanitizedConfig,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let config_path = std::env::var("SEGREGATOR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    let config = match load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            init_logging(LogFormat::default());
            error!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(config.logging.format);

    if let Err(e) = run(config, &config_path).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn load(config_path: &Path) -> Result<Config> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    Ok(config)
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run(config: Config, config_path: &Path) -> Result<()> {
    info!("cat-segregator {} starting", VERSION);
    info!("Configuration loaded from {:?}", config_path);

    // Hash the redacted view so the value is safe to log
    let sanitized = SanitizedConfig::from(&config);
    let sanitized_json = serde_json::to_string(&sanitized).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(sanitized_json.as_bytes()));
    info!("Config hash: {}", &config_hash[..16]);
    info!("Effective configuration: {}", sanitized_json);

    let orchestrator =
        RunOrchestrator::from_config(&config).context("Failed to initialize pipeline")?;

    let summary = orchestrator.run().await;

    info!(
        run_id = %summary.run_id,
        processed = summary.statistics.processed,
        failed = summary.statistics.failed,
        dispatch = ?summary.dispatch,
        "Run complete in {:.1}s",
        summary.duration.as_secs_f64()
    );

    Ok(())
}
