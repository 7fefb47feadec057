//! Image classification.
//!
//! Two independent labels are derived from every decoded image:
//!
//! - [`Warmth`] from raw pixel statistics (pure, infallible)
//! - [`Vibe`] from a vision-language [`Scorer`] comparing the image against
//!   two fixed descriptions
//!
//! The scorer is the only external dependency here and sits behind a trait so
//! tests can swap in a deterministic stub.

mod clip_http;
mod raster;
mod vibe;
mod warmth;

pub use clip_http::{softmax, HttpScorer, HttpScorerConfig};
pub use raster::DecodedImage;
pub use vibe::{Scorer, Vibe, VibeClassifier, FUNNY_THRESHOLD, VIBE_DESCRIPTIONS};
pub use warmth::{ChannelMeans, Warmth, WarmthClassifier};

use thiserror::Error;

/// Errors that can occur while scoring an image.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Scorer returned an error status.
    #[error("Scorer error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the scorer response.
    #[error("Failed to parse scorer response: {0}")]
    ParseError(String),

    /// The image could not be encoded for upload to the scorer.
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// The distribution does not line up with the descriptions.
    #[error("Expected {expected} probabilities, got {actual}")]
    InvalidDistribution { expected: usize, actual: usize },

    /// Scorer not configured.
    #[error("Scorer not configured: {0}")]
    NotConfigured(String),
}
