//! Mock vision-language scorer for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::classify::{DecodedImage, Scorer, ScorerError};

/// Mock implementation of the Scorer trait.
///
/// Queued responses are returned one per call, in order. Once the queue is
/// empty every call returns the default distribution (`[0.5, 0.5]`, which
/// classifies as `Normal`).
///
/// # Example
///
/// ```rust,ignore
/// let scorer = MockScorer::new();
/// scorer.push_probabilities(vec![0.61, 0.39]).await; // Funny
/// scorer.push_error(ScorerError::NotConfigured("down".into())).await;
/// ```
#[derive(Debug, Clone)]
pub struct MockScorer {
    responses: Arc<RwLock<VecDeque<Result<Vec<f32>, ScorerError>>>>,
    default: Arc<RwLock<Vec<f32>>>,
    calls: Arc<RwLock<Vec<Vec<String>>>>,
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScorer {
    /// Create a new scorer with the even default distribution.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(VecDeque::new())),
            default: Arc::new(RwLock::new(vec![0.5, 0.5])),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a distribution for the next unanswered call.
    pub async fn push_probabilities(&self, probabilities: Vec<f32>) {
        self.responses.write().await.push_back(Ok(probabilities));
    }

    /// Queue a failure for the next unanswered call.
    pub async fn push_error(&self, error: ScorerError) {
        self.responses.write().await.push_back(Err(error));
    }

    /// Change the distribution returned once the queue is empty.
    pub async fn set_default(&self, probabilities: Vec<f32>) {
        *self.default.write().await = probabilities;
    }

    /// Number of score calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Descriptions passed on each call.
    pub async fn recorded_descriptions(&self) -> Vec<Vec<String>> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl Scorer for MockScorer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn score(
        &self,
        _image: &DecodedImage,
        descriptions: &[&str],
    ) -> Result<Vec<f32>, ScorerError> {
        self.calls
            .write()
            .await
            .push(descriptions.iter().map(|d| d.to_string()).collect());

        match self.responses.write().await.pop_front() {
            Some(response) => response,
            None => Ok(self.default.read().await.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::VIBE_DESCRIPTIONS;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_queue_then_default() {
        let scorer = MockScorer::new();
        scorer.push_probabilities(vec![0.9, 0.1]).await;
        let image = fixtures::solid_image([1, 2, 3]);

        assert_eq!(
            scorer.score(&image, &VIBE_DESCRIPTIONS).await.unwrap(),
            vec![0.9, 0.1]
        );
        assert_eq!(
            scorer.score(&image, &VIBE_DESCRIPTIONS).await.unwrap(),
            vec![0.5, 0.5]
        );
        assert_eq!(scorer.call_count().await, 2);
        assert_eq!(
            scorer.recorded_descriptions().await[0],
            vec!["a funny goofy cat", "a normal calm cat"]
        );
    }

    #[tokio::test]
    async fn test_set_default() {
        let scorer = MockScorer::new();
        scorer.set_default(vec![0.7, 0.3]).await;
        let image = fixtures::solid_image([1, 2, 3]);

        assert_eq!(
            scorer.score(&image, &VIBE_DESCRIPTIONS).await.unwrap(),
            vec![0.7, 0.3]
        );
    }

    #[tokio::test]
    async fn test_queued_error() {
        let scorer = MockScorer::new();
        scorer
            .push_error(ScorerError::ParseError("bad json".to_string()))
            .await;
        let image = fixtures::solid_image([1, 2, 3]);

        assert!(scorer.score(&image, &VIBE_DESCRIPTIONS).await.is_err());
    }
}
