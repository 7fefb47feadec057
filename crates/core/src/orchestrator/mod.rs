//! Run orchestrator for the classify-and-route pipeline.
//!
//! A run processes one catalog batch:
//! - **Fetch**: one catalog call; failures yield an empty batch
//! - **Per item** (sequential): download, decode, warmth + vibe, upload
//! - **Report**: statistics rendered and sent to one notification channel
//!
//! No failure aborts a run. Item failures are counted, delivery failures are
//! logged.

mod runner;
mod types;

pub use runner::RunOrchestrator;
pub use types::{
    ItemError, ItemOutcome, ItemState, OrchestratorError, RunStatistics, RunSummary,
};
