//! Color temperature from per-channel means.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::raster::DecodedImage;

/// Whether an image skews red (`Warm`) or not (`Cool`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Warmth {
    Warm,
    Cool,
}

impl Warmth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Warmth::Warm => "Warm",
            Warmth::Cool => "Cool",
        }
    }
}

impl fmt::Display for Warmth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean intensity of each channel over all pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelMeans {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ChannelMeans {
    /// An empty raster has all means at 0.
    pub fn of(image: &DecodedImage) -> Self {
        let count = image.pixel_count();
        if count == 0 {
            return Self::default();
        }

        let mut sums = [0u64; 3];
        for pixel in image.raster().pixels() {
            sums[0] += u64::from(pixel[0]);
            sums[1] += u64::from(pixel[1]);
            sums[2] += u64::from(pixel[2]);
        }

        let count = count as f64;
        Self {
            red: sums[0] as f64 / count,
            green: sums[1] as f64 / count,
            blue: sums[2] as f64 / count,
        }
    }
}

/// Labels images `Warm` when the mean red exceeds the mean blue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarmthClassifier;

impl WarmthClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, image: &DecodedImage) -> Warmth {
        Self::classify_means(&ChannelMeans::of(image))
    }

    /// Ties go to `Cool`.
    pub fn classify_means(means: &ChannelMeans) -> Warmth {
        if means.red > means.blue {
            Warmth::Warm
        } else {
            Warmth::Cool
        }
    }
}
