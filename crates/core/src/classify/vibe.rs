//! Content vibe from a vision-language scorer.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::raster::DecodedImage;
use super::ScorerError;

/// Probability the first description must exceed for an image to be `Funny`.
pub const FUNNY_THRESHOLD: f32 = 0.6;

/// Category descriptions handed to the scorer, `Funny` first.
pub const VIBE_DESCRIPTIONS: [&str; 2] = ["a funny goofy cat", "a normal calm cat"];

/// Whether an image reads as funny or normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vibe {
    Funny,
    Normal,
}

impl Vibe {
    /// Strictly greater than [`FUNNY_THRESHOLD`] is `Funny`; NaN is `Normal`.
    pub fn from_funny_probability(probability: f32) -> Self {
        if probability > FUNNY_THRESHOLD {
            Vibe::Funny
        } else {
            Vibe::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Funny => "Funny",
            Vibe::Normal => "Normal",
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pretrained image/text scorer.
///
/// Given an image and N textual descriptions, returns a probability
/// distribution with one entry per description, in the same order.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Name of this scorer for logging.
    fn name(&self) -> &str;

    async fn score(
        &self,
        image: &DecodedImage,
        descriptions: &[&str],
    ) -> Result<Vec<f32>, ScorerError>;
}

/// Labels images by asking a [`Scorer`] about [`VIBE_DESCRIPTIONS`].
#[derive(Clone)]
pub struct VibeClassifier {
    scorer: Arc<dyn Scorer>,
}

impl VibeClassifier {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub async fn classify(&self, image: &DecodedImage) -> Result<Vibe, ScorerError> {
        let probabilities = self.scorer.score(image, &VIBE_DESCRIPTIONS).await?;

        if probabilities.len() != VIBE_DESCRIPTIONS.len() {
            return Err(ScorerError::InvalidDistribution {
                expected: VIBE_DESCRIPTIONS.len(),
                actual: probabilities.len(),
            });
        }

        debug!(
            "{} scored funny={:.3} normal={:.3}",
            self.scorer.name(),
            probabilities[0],
            probabilities[1]
        );

        Ok(Vibe::from_funny_probability(probabilities[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    struct FixedScorer(Vec<f32>);

    #[async_trait]
    impl Scorer for FixedScorer {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn score(
            &self,
            _image: &DecodedImage,
            descriptions: &[&str],
        ) -> Result<Vec<f32>, ScorerError> {
            assert_eq!(descriptions, VIBE_DESCRIPTIONS);
            Ok(self.0.clone())
        }
    }

    fn image() -> DecodedImage {
        DecodedImage::from_rgb(RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])))
    }

    async fn classify_with(probabilities: Vec<f32>) -> Result<Vibe, ScorerError> {
        VibeClassifier::new(Arc::new(FixedScorer(probabilities)))
            .classify(&image())
            .await
    }

    #[tokio::test]
    async fn test_above_threshold_is_funny() {
        let vibe = classify_with(vec![0.61, 0.39]).await.unwrap();
        assert_eq!(vibe, Vibe::Funny);
    }

    #[tokio::test]
    async fn test_exact_threshold_is_normal() {
        let vibe = classify_with(vec![0.60, 0.40]).await.unwrap();
        assert_eq!(vibe, Vibe::Normal);
    }

    #[tokio::test]
    async fn test_even_split_is_normal() {
        let vibe = classify_with(vec![0.5, 0.5]).await.unwrap();
        assert_eq!(vibe, Vibe::Normal);
    }

    #[tokio::test]
    async fn test_wrong_length_distribution_is_error() {
        let result = classify_with(vec![0.9]).await;
        assert!(matches!(
            result,
            Err(ScorerError::InvalidDistribution {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_nan_is_normal() {
        assert_eq!(Vibe::from_funny_probability(f32::NAN), Vibe::Normal);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vibe::Funny.to_string(), "Funny");
        assert_eq!(Vibe::Normal.to_string(), "Normal");
    }
}
