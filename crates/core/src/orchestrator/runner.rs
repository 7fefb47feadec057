//! Run orchestrator implementation.
//!
//! One run = fetch a batch, then for each item in order:
//! download -> decode -> classify (warmth, vibe) -> upload.
//! Items are processed one at a time; nothing is spawned.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::catalog::{CatApiSource, CatalogItem, HttpImageFetcher, ImageFetcher, ImageSource};
use crate::classify::{
    ChannelMeans, DecodedImage, HttpScorer, Vibe, VibeClassifier, Warmth, WarmthClassifier,
};
use crate::config::Config;
use crate::report::{build_report, Reporter};
use crate::storage::{destination_path, OciObjectStorage, StorageRouter};

use super::types::{
    ItemError, ItemOutcome, ItemState, OrchestratorError, RunStatistics, RunSummary,
};

/// An item that made it through classification.
struct ClassifiedItem {
    /// Original downloaded bytes, uploaded as-is.
    bytes: Vec<u8>,
    warmth: Warmth,
    vibe: Vibe,
}

/// Drives one batch through the pipeline and reports on it.
pub struct RunOrchestrator {
    source: Arc<dyn ImageSource>,
    fetcher: Arc<dyn ImageFetcher>,
    vibe: VibeClassifier,
    storage: StorageRouter,
    reporter: Reporter,
}

impl RunOrchestrator {
    pub fn new(
        source: Arc<dyn ImageSource>,
        fetcher: Arc<dyn ImageFetcher>,
        vibe: VibeClassifier,
        storage: StorageRouter,
        reporter: Reporter,
    ) -> Self {
        Self {
            source,
            fetcher,
            vibe,
            storage,
            reporter,
        }
    }

    /// Build an orchestrator with the HTTP-backed adapters from `config`.
    pub fn from_config(config: &Config) -> Result<Self, OrchestratorError> {
        let source = CatApiSource::new(config.catalog.clone())?;
        let fetcher = HttpImageFetcher::new(&config.fetcher)?;
        let scorer = HttpScorer::new(config.scorer.clone())?;
        let store = OciObjectStorage::new(config.storage.clone())?;
        let reporter = Reporter::from_config(&config.notify)?;

        Ok(Self::new(
            Arc::new(source),
            Arc::new(fetcher),
            VibeClassifier::new(Arc::new(scorer)),
            StorageRouter::new(Arc::new(store)),
            reporter,
        ))
    }

    /// Execute one complete run. Never fails; every problem ends up in the
    /// statistics or the logs.
    pub async fn run(&self) -> RunSummary {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("run", run_id = %run_id);

        self.run_inner(run_id.clone()).instrument(span).await
    }

    async fn run_inner(&self, run_id: String) -> RunSummary {
        let started_at = Utc::now();
        let clock = Instant::now();
        info!("Job started at {}", started_at.to_rfc3339());

        let batch = self.source.fetch_batch().await;
        info!(
            "Processing {} items from {} (scorer: {}, storage: {})",
            batch.len(),
            self.source.name(),
            self.vibe.scorer_name(),
            self.storage.backend_name()
        );

        let mut statistics = RunStatistics::default();
        let mut items = Vec::with_capacity(batch.len());

        for item in &batch {
            let outcome = self
                .process_item(item, &mut statistics)
                .instrument(info_span!("item", id = %item.id))
                .await;
            items.push(outcome);
        }

        let duration = clock.elapsed();
        info!(
            "Run finished: {} processed, {} failed in {:.1}s",
            statistics.processed,
            statistics.failed,
            duration.as_secs_f64()
        );

        let report = build_report(&statistics, duration);
        let dispatch = self.reporter.dispatch(&report).await;

        RunSummary {
            run_id,
            started_at,
            duration,
            statistics,
            items,
            report,
            dispatch,
        }
    }

    /// Take one item to a terminal state, updating `stats` exactly once for
    /// processed/failed.
    async fn process_item(&self, item: &CatalogItem, stats: &mut RunStatistics) -> ItemOutcome {
        let classified = match self.classify_item(item).await {
            Ok(classified) => classified,
            Err(e) => {
                warn!(
                    "Error on {} (last state: {:?}): {}",
                    item.id,
                    e.last_state(),
                    e
                );
                stats.record_failed();
                return ItemOutcome::unclassified(item, &e);
            }
        };

        let ClassifiedItem {
            bytes,
            warmth,
            vibe,
        } = classified;

        // Labels count even if the upload below fails.
        stats.record_labels(warmth, vibe);

        let destination = destination_path(&item.id, warmth, vibe);
        info!("Processing: {}.jpg -> [{} | {}]", item.id, warmth, vibe);

        let upload = self.storage.upload(bytes, &destination).await;
        match upload.error {
            None => {
                stats.record_processed();
                debug!("{} -> {:?}", item.id, ItemState::Routed);
                ItemOutcome::routed(item, warmth, vibe, destination)
            }
            Some(error) => {
                stats.record_failed();
                ItemOutcome::upload_failed(item, warmth, vibe, destination, error)
            }
        }
    }

    async fn classify_item(&self, item: &CatalogItem) -> Result<ClassifiedItem, ItemError> {
        if let Some(defect) = &item.defect {
            return Err(ItemError::Malformed(defect.clone()));
        }

        let bytes = self.fetcher.fetch(&item.fetch_url).await?;
        debug!("{} -> {:?} ({} bytes)", item.id, ItemState::Fetched, bytes.len());

        let image = DecodedImage::decode(&bytes)?;
        debug!(
            "{} -> {:?} ({}x{})",
            item.id,
            ItemState::Decoded,
            image.width(),
            image.height()
        );

        let means = ChannelMeans::of(&image);
        let warmth = WarmthClassifier::classify_means(&means);
        let vibe = self.vibe.classify(&image).await?;
        debug!(
            "{} -> {:?} (r={:.1} g={:.1} b={:.1})",
            item.id,
            ItemState::Classified,
            means.red,
            means.green,
            means.blue
        );

        Ok(ClassifiedItem {
            bytes,
            warmth,
            vibe,
        })
    }
}
