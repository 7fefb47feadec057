//! Types for the run orchestrator.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogError, CatalogItem, FetchError};
use crate::classify::{ScorerError, Vibe, Warmth};
use crate::notify::{DispatchOutcome, NotifyError};
use crate::report::RunReport;
use crate::storage::StorageError;

/// Errors that can occur while wiring an orchestrator from configuration.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("image fetcher error: {0}")]
    Fetcher(#[from] FetchError),

    #[error("scorer error: {0}")]
    Scorer(#[from] ScorerError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("notifier error: {0}")]
    Notify(#[from] NotifyError),
}

/// Why a single item failed before reaching storage.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("malformed catalog entry: {0}")]
    Malformed(String),

    #[error("download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("vibe scoring failed: {0}")]
    Classify(#[from] ScorerError),
}

impl ItemError {
    /// Last state the item reached before failing.
    pub fn last_state(&self) -> Option<ItemState> {
        match self {
            ItemError::Malformed(_) | ItemError::Fetch(_) => None,
            ItemError::Decode(_) => Some(ItemState::Fetched),
            ItemError::Classify(_) => Some(ItemState::Decoded),
        }
    }
}

/// Per-item pipeline state.
///
/// `Fetched -> Decoded -> Classified -> Routed`, with `Failed` reachable from
/// any state. `Routed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Fetched,
    Decoded,
    Classified,
    Routed,
    Failed,
}

impl ItemState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemState::Routed | ItemState::Failed)
    }
}

/// Counters for one run.
///
/// `processed + failed` always equals the number of items attempted. Label
/// counters only move once both labels are known, so they can exceed
/// `processed` when uploads fail after classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub processed: u32,
    pub failed: u32,
    pub warm: u32,
    pub cool: u32,
    pub funny: u32,
    pub normal: u32,
}

impl RunStatistics {
    pub fn record_labels(&mut self, warmth: Warmth, vibe: Vibe) {
        match warmth {
            Warmth::Warm => self.warm += 1,
            Warmth::Cool => self.cool += 1,
        }
        match vibe {
            Vibe::Funny => self.funny += 1,
            Vibe::Normal => self.normal += 1,
        }
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn attempted(&self) -> u32 {
        self.processed + self.failed
    }

    /// Items that got both labels.
    pub fn classified(&self) -> u32 {
        self.warm + self.cool
    }
}

/// Final record for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub item_id: String,
    /// Terminal state, `Routed` or `Failed`.
    pub state: ItemState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmth: Option<Warmth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibe: Option<Vibe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    pub fn routed(item: &CatalogItem, warmth: Warmth, vibe: Vibe, destination: String) -> Self {
        Self {
            item_id: item.id.clone(),
            state: ItemState::Routed,
            warmth: Some(warmth),
            vibe: Some(vibe),
            destination: Some(destination),
            error: None,
        }
    }

    pub fn unclassified(item: &CatalogItem, error: &ItemError) -> Self {
        Self {
            item_id: item.id.clone(),
            state: ItemState::Failed,
            warmth: None,
            vibe: None,
            destination: None,
            error: Some(error.to_string()),
        }
    }

    pub fn upload_failed(
        item: &CatalogItem,
        warmth: Warmth,
        vibe: Vibe,
        destination: String,
        error: String,
    ) -> Self {
        Self {
            item_id: item.id.clone(),
            state: ItemState::Failed,
            warmth: Some(warmth),
            vibe: Some(vibe),
            destination: Some(destination),
            error: Some(error),
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub statistics: RunStatistics,
    pub items: Vec<ItemOutcome>,
    pub report: RunReport,
    pub dispatch: DispatchOutcome,
}
