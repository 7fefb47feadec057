pub mod catalog;
pub mod classify;
pub mod config;
pub mod notify;
pub mod orchestrator;
pub mod report;
pub mod storage;
pub mod testing;

pub use catalog::{
    CatApiConfig, CatApiSource, CatalogError, CatalogItem, FetchError, FetcherConfig,
    HttpImageFetcher, ImageFetcher, ImageSource,
};
pub use classify::{
    ChannelMeans, DecodedImage, HttpScorer, HttpScorerConfig, Scorer, ScorerError, Vibe,
    VibeClassifier, Warmth, WarmthClassifier, FUNNY_THRESHOLD, VIBE_DESCRIPTIONS,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LogFormat,
    LoggingConfig, SanitizedConfig,
};
pub use notify::{
    create_notifier, ChannelKind, DispatchOutcome, Notifier, NotifyConfig, NotifyError,
    TelegramNotifier, WebhookNotifier,
};
pub use orchestrator::{
    ItemError, ItemOutcome, ItemState, OrchestratorError, RunOrchestrator, RunStatistics,
    RunSummary,
};
pub use report::{build_report, Reporter, RunReport, REPORT_RULE};
pub use storage::{
    destination_path, ObjectStore, OciObjectStorage, OciStorageConfig, StorageError,
    StorageRouter, UploadOutcome,
};
